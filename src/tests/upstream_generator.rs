#[cfg(test)]
mod test {
    use httpmock::Method::POST;
    use httpmock::MockServer;
    use serde_json::json;

    use crate::generator::upstream::UpstreamGenerator;
    use crate::generator::{GenerateCredential, GenerationError};
    use crate::tests::common::build_reqwest_client;

    #[tokio::test]
    async fn parses_fields_from_sidecar_response() {
        let sidecar = MockServer::start_async().await;
        sidecar.mock(|when, then| {
            when.method(POST).path("/generate");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!({
                    "visitorData": "CgtVaXNpdG9yLTEyMw%3D%3D",
                    "poToken": "MnQLx-abc123",
                }));
        });

        let generator = UpstreamGenerator::new(
            build_reqwest_client(),
            format!("{}/generate", sidecar.base_url()),
        );

        let generated = generator.generate().await.expect("generation should succeed");
        assert_eq!(generated.visitor_data, "CgtVaXNpdG9yLTEyMw%3D%3D");
        assert_eq!(generated.po_token, "MnQLx-abc123");
    }

    #[tokio::test]
    async fn missing_fields_are_success_with_empty_strings() {
        let sidecar = MockServer::start_async().await;
        sidecar.mock(|when, then| {
            when.method(POST).path("/generate");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!({}));
        });

        let generator = UpstreamGenerator::new(
            build_reqwest_client(),
            format!("{}/generate", sidecar.base_url()),
        );

        let generated = generator.generate().await.expect("partial data is still success");
        assert_eq!(generated.visitor_data, "");
        assert_eq!(generated.po_token, "");
    }

    #[tokio::test]
    async fn non_success_status_surfaces_as_upstream_error() {
        let sidecar = MockServer::start_async().await;
        sidecar.mock(|when, then| {
            when.method(POST).path("/generate");
            then.status(502);
        });

        let generator = UpstreamGenerator::new(
            build_reqwest_client(),
            format!("{}/generate", sidecar.base_url()),
        );

        match generator.generate().await {
            Err(GenerationError::Upstream(msg)) => assert!(msg.contains("502")),
            other => panic!("expected upstream error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn unreachable_sidecar_surfaces_as_upstream_error() {
        let generator = UpstreamGenerator::new(
            build_reqwest_client(),
            // reserved port, nothing listens here
            "http://127.0.0.1:1/generate".to_string(),
        );

        assert!(matches!(
            generator.generate().await,
            Err(GenerationError::Upstream(_))
        ));
    }
}
