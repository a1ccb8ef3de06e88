use prompt_gallery::{
    create_in_memory_app, CreatePostRequest, ErrorCode, GenerationError, GenerationService,
    PostService,
};

fn balloon_request() -> CreatePostRequest {
    CreatePostRequest {
        name: "Al".to_string(),
        prompt: "a red balloon".to_string(),
        photo: "data:image/jpeg;base64,AQID".to_string(),
    }
}

#[tokio::test]
async fn empty_prompts_are_rejected_before_the_provider() {
    let services = create_in_memory_app().await.unwrap();

    for prompt in ["", "   ", "\n\t"] {
        let err = services
            .generation_service
            .generate_image(prompt)
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::InvalidPrompt(_)));
    }
}

#[tokio::test]
async fn generation_without_provider_credentials_is_a_configuration_error() {
    // the in-memory app wires the real generation adapter with no API key
    let services = create_in_memory_app().await.unwrap();

    let err = services
        .generation_service
        .generate_image("a red balloon")
        .await
        .unwrap_err();
    assert!(matches!(err, GenerationError::MissingConfiguration(_)));
}

#[tokio::test]
async fn publish_without_media_credentials_degrades_to_inline_storage() {
    // the in-memory app wires the real media adapter with no credentials,
    // so every upload fails and the default fallback applies
    let services = create_in_memory_app().await.unwrap();

    let receipt = services
        .post_service
        .create_post(balloon_request())
        .await
        .unwrap();

    assert!(receipt.warning.is_some());
    assert_eq!(receipt.post.photo, "data:image/jpeg;base64,AQID");

    let posts = services.post_service.list_posts().await.unwrap();
    assert_eq!(posts.len(), 1);
}

#[tokio::test]
async fn publish_with_missing_fields_creates_no_record() {
    let services = create_in_memory_app().await.unwrap();

    for broken in [
        CreatePostRequest {
            name: String::new(),
            ..balloon_request()
        },
        CreatePostRequest {
            prompt: String::new(),
            ..balloon_request()
        },
        CreatePostRequest {
            photo: String::new(),
            ..balloon_request()
        },
    ] {
        let err = services.post_service.create_post(broken).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::MissingField);
    }

    assert!(services.post_service.list_posts().await.unwrap().is_empty());
}

#[tokio::test]
async fn listing_returns_every_created_post_with_all_fields() {
    let services = create_in_memory_app().await.unwrap();

    for i in 0..7 {
        let mut request = balloon_request();
        request.prompt = format!("a red balloon #{}", i);
        services.post_service.create_post(request).await.unwrap();
    }

    let posts = services.post_service.list_posts().await.unwrap();
    assert_eq!(posts.len(), 7);
    for post in posts {
        assert!(!post.name.is_empty());
        assert!(!post.prompt.is_empty());
        assert!(!post.photo.is_empty());
    }
}
