use super::*;

mod new {
    use super::*;

    #[test]
    fn should_fill_origin_and_target_and_keep_defaults() {
        // Arrange & Act
        let request = ProbeRequest::new("https://app.example", "https://api.example/data");

        // Assert
        assert_eq!(request.origin, "https://app.example");
        assert_eq!(request.target, "https://api.example/data");
        assert_eq!(request.method, "GET");
        assert!(request.headers.is_empty());
        assert_eq!(request.timeout, DEFAULT_TIMEOUT);
    }
}

mod default {
    use super::*;

    #[test]
    fn should_use_get_and_ten_second_timeout() {
        // Arrange & Act
        let request = ProbeRequest::default();

        // Assert
        assert_eq!(request.method, "GET");
        assert_eq!(request.timeout, Duration::from_secs(10));
    }

    #[test]
    fn should_not_share_state_between_instances() {
        // Arrange
        let mut first = ProbeRequest::default();
        let second = ProbeRequest::default();

        // Act
        first.method = "DELETE".into();

        // Assert
        assert_ne!(first.method, second.method);
    }
}
