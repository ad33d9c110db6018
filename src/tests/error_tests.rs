#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};
    use http_body_util::BodyExt;
    use serde_json::Value;

    use crate::error::validation::{validate_library_name, validate_library_paths};
    use crate::error::AppError;
    use crate::upstream::UpstreamError;

    async fn body_json(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_status_mapping() {
        let cases = vec![
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND, "NOT_FOUND"),
            (AppError::ServiceUnavailable("x".into()), StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE"),
            (AppError::Database("x".into()), StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR"),
            (AppError::Upstream("x".into()), StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR"),
            (AppError::Internal(anyhow::anyhow!("boom")), StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        ];
        for (err, status, code) in cases {
            let (got_status, body) = body_json(err).await;
            assert_eq!(got_status, status);
            assert_eq!(body["error"]["code"], code);
            assert_eq!(body["status"], status.as_u16());
            assert!(body["timestamp"].is_string());
        }
    }

    #[tokio::test]
    async fn test_internal_error_hides_message() {
        let (_, body) = body_json(AppError::Internal(anyhow::anyhow!("secret detail"))).await;
        assert_eq!(body["error"]["message"], "An internal server error occurred");
        assert!(body["error"]["details"]["error_id"].is_string());
    }

    #[tokio::test]
    async fn test_validation_error_details() {
        let err = AppError::ValidationError { field: "name".into(), message: "empty".into() };
        let (status, body) = body_json(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["details"]["field"], "name");
        assert_eq!(body["error"]["details"]["message"], "empty");
    }

    #[test]
    fn test_anyhow_keeps_database_classification() {
        let err: AppError = anyhow::Error::new(sqlx::Error::RowNotFound).into();
        assert!(matches!(err, AppError::NotFound(_)));

        let err: AppError = anyhow::Error::new(sqlx::Error::PoolTimedOut).into();
        assert!(matches!(err, AppError::ServiceUnavailable(_)));

        let err: AppError = anyhow::anyhow!("plain failure").into();
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[test]
    fn test_upstream_error_conversion() {
        let err: AppError = UpstreamError::Status { status: 401, endpoint: "/ScheduledTasks".into() }.into();
        match err {
            AppError::Upstream(msg) => assert!(msg.contains("401") && msg.contains("/ScheduledTasks")),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_library_name_validation() {
        assert!(validate_library_name("Movies", "name").is_ok());
        assert!(validate_library_name("Kids & Family", "name").is_ok());
        assert!(validate_library_name("", "name").is_err());
        assert!(validate_library_name("   ", "name").is_err());
        assert!(validate_library_name(" Movies", "name").is_err());
        assert!(validate_library_name("Mov\nies", "name").is_err());

        match validate_library_name("", "libraryOrder") {
            Err(AppError::ValidationError { field, .. }) => assert_eq!(field, "libraryOrder"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_library_paths_validation() {
        assert!(validate_library_paths(&[]).is_ok());
        assert!(validate_library_paths(&["/media/movies".to_string()]).is_ok());
        assert!(validate_library_paths(&["".to_string()]).is_err());
        assert!(validate_library_paths(&["/media/\0bad".to_string()]).is_err());
    }
}
