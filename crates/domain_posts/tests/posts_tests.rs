//! Tests for the posts domain: entity transitions and the application service

use std::sync::Arc;

use chrono::NaiveDate;

use core_kernel::ports::mock::MockObjectStore;
use core_kernel::{PageRequest, PhotoUpload, UserId};
use domain_posts::ports::mock::MockPostStore;
use domain_posts::{
    Category, CreatePostRequest, PostError, PostQuery, PostService, PostStatus, PostStore,
    PostType, PostUpdate,
};
use test_utils::{assert_post_unclaimed, TestPostBuilder};

fn service(store: Arc<MockPostStore>) -> PostService {
    PostService::new(store, Arc::new(MockObjectStore::new()))
}

fn create_request(owner: UserId) -> CreatePostRequest {
    CreatePostRequest {
        owner_id: owner,
        post_type: PostType::Found,
        category: "Electronics".to_string(),
        location: "Central station".to_string(),
        date: NaiveDate::from_ymd_opt(2025, 2, 14).unwrap(),
        description: "Silver wristwatch near platform 4".to_string(),
        photo: None,
    }
}

// ============================================================================
// Creation
// ============================================================================

mod create_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_post_starts_unclaimed() {
        let store = Arc::new(MockPostStore::new());
        let service = service(store.clone());

        let detail = service.create_post(create_request(UserId::new_v7())).await.unwrap();

        assert_post_unclaimed(&detail.post);
        assert!(detail.image_url.is_none());
    }

    #[tokio::test]
    async fn test_create_post_resolves_known_category() {
        let category = Category::new("Electronics");
        let category_id = category.id;
        let store = Arc::new(MockPostStore::with_categories(vec![category]).await);
        let service = service(store);

        let mut request = create_request(UserId::new_v7());
        request.category = "electronics".to_string();
        let detail = service.create_post(request).await.unwrap();

        assert_eq!(detail.post.category_id, Some(category_id));
        assert!(detail.post.custom_category.is_none());
    }

    #[tokio::test]
    async fn test_create_post_keeps_unknown_category_as_custom() {
        let store = Arc::new(MockPostStore::new());
        let service = service(store);

        let mut request = create_request(UserId::new_v7());
        request.category = "vintage cameras".to_string();
        let detail = service.create_post(request).await.unwrap();

        assert!(detail.post.category_id.is_none());
        assert_eq!(detail.post.custom_category.as_deref(), Some("vintage cameras"));
    }

    #[tokio::test]
    async fn test_create_post_requires_description() {
        let store = Arc::new(MockPostStore::new());
        let service = service(store);

        let mut request = create_request(UserId::new_v7());
        request.description = "   ".to_string();
        let result = service.create_post(request).await;

        assert!(matches!(result, Err(PostError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_post_requires_location() {
        let store = Arc::new(MockPostStore::new());
        let service = service(store);

        let mut request = create_request(UserId::new_v7());
        request.location = String::new();
        let result = service.create_post(request).await;

        assert!(matches!(result, Err(PostError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_post_with_photo_attaches_media() {
        let store = Arc::new(MockPostStore::new());
        let service = service(store.clone());

        let mut request = create_request(UserId::new_v7());
        request.photo = Some(PhotoUpload::new(vec![0u8; 64], "watch.jpg", "image/jpeg"));
        let detail = service.create_post(request).await.unwrap();

        let url = detail.image_url.expect("media url");
        assert!(url.ends_with("watch.jpg"));

        let stored = store.find_media(detail.post.id).await.unwrap();
        assert!(stored.is_some());
    }
}

// ============================================================================
// Read / update / delete
// ============================================================================

mod crud_tests {
    use super::*;

    #[tokio::test]
    async fn test_get_post_unknown_id_is_not_found() {
        let store = Arc::new(MockPostStore::new());
        let service = service(store);

        let result = service.get_post(core_kernel::PostId::new_v7()).await;
        assert!(matches!(result, Err(PostError::PostNotFound(_))));
    }

    #[tokio::test]
    async fn test_update_post_owner_edits_details() {
        let owner = UserId::new_v7();
        let store = Arc::new(MockPostStore::new());
        let post = TestPostBuilder::new().with_owner(owner).build();
        store.seed_post(post.clone()).await;
        let service = service(store);

        let updated = service
            .update_post(
                post.id,
                owner,
                PostUpdate {
                    description: Some("  Updated description  ".to_string()),
                    location: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.description, "Updated description");
        assert_eq!(updated.location, post.location);
    }

    #[tokio::test]
    async fn test_update_post_rejects_non_owner() {
        let store = Arc::new(MockPostStore::new());
        let post = TestPostBuilder::new().build();
        store.seed_post(post.clone()).await;
        let service = service(store);

        let result = service
            .update_post(
                post.id,
                UserId::new_v7(),
                PostUpdate {
                    description: Some("hijacked".to_string()),
                    location: None,
                },
            )
            .await;

        assert!(matches!(result, Err(PostError::NotOwner)));
    }

    #[tokio::test]
    async fn test_update_post_requires_a_field() {
        let owner = UserId::new_v7();
        let store = Arc::new(MockPostStore::new());
        let post = TestPostBuilder::new().with_owner(owner).build();
        store.seed_post(post.clone()).await;
        let service = service(store);

        let result = service
            .update_post(
                post.id,
                owner,
                PostUpdate {
                    description: Some("   ".to_string()),
                    location: None,
                },
            )
            .await;

        assert!(matches!(result, Err(PostError::NoUpdateFields)));
    }

    #[tokio::test]
    async fn test_update_post_never_touches_status() {
        let owner = UserId::new_v7();
        let store = Arc::new(MockPostStore::new());
        let post = TestPostBuilder::new()
            .with_owner(owner)
            .with_status(PostStatus::ClaimInProgress)
            .build();
        store.seed_post(post.clone()).await;
        let service = service(store);

        let updated = service
            .update_post(
                post.id,
                owner,
                PostUpdate {
                    description: Some("still mine".to_string()),
                    location: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.status, PostStatus::ClaimInProgress);
    }

    #[tokio::test]
    async fn test_delete_post_cascades_media_only() {
        let owner = UserId::new_v7();
        let store = Arc::new(MockPostStore::new());
        let service = service(store.clone());

        let mut request = create_request(owner);
        request.photo = Some(PhotoUpload::new(vec![0u8; 8], "item.png", "image/png"));
        let detail = service.create_post(request).await.unwrap();
        let post_id = detail.post.id;

        service.delete_post(post_id, owner).await.unwrap();

        assert!(store.find(post_id).await.unwrap().is_none());
        assert!(store.find_media(post_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_post_rejects_non_owner() {
        let store = Arc::new(MockPostStore::new());
        let post = TestPostBuilder::new().build();
        store.seed_post(post.clone()).await;
        let service = service(store);

        let result = service.delete_post(post.id, UserId::new_v7()).await;
        assert!(matches!(result, Err(PostError::NotOwner)));
    }
}

// ============================================================================
// Listing
// ============================================================================

mod list_tests {
    use super::*;

    #[tokio::test]
    async fn test_list_filters_by_type() {
        let store = Arc::new(MockPostStore::new());
        store.seed_post(TestPostBuilder::new().with_type(PostType::Lost).build()).await;
        store.seed_post(TestPostBuilder::new().with_type(PostType::Found).build()).await;
        store.seed_post(TestPostBuilder::new().with_type(PostType::Found).build()).await;
        let service = service(store);

        let page = service
            .list_posts(
                PostQuery {
                    post_type: Some(PostType::Found),
                    ..Default::default()
                },
                PageRequest::default(),
            )
            .await
            .unwrap();

        assert_eq!(page.pagination.total, 2);
        assert!(page.posts.iter().all(|d| d.post.post_type == PostType::Found));
    }

    #[tokio::test]
    async fn test_list_filters_by_keyword() {
        let store = Arc::new(MockPostStore::new());
        store
            .seed_post(
                TestPostBuilder::new()
                    .with_description("Blue backpack with laptop stickers")
                    .build(),
            )
            .await;
        store
            .seed_post(TestPostBuilder::new().with_description("Set of house keys").build())
            .await;
        let service = service(store);

        let page = service
            .list_posts(
                PostQuery {
                    keyword: Some("BACKPACK".to_string()),
                    ..Default::default()
                },
                PageRequest::default(),
            )
            .await
            .unwrap();

        assert_eq!(page.pagination.total, 1);
        assert!(page.posts[0].post.description.contains("backpack"));
    }

    #[tokio::test]
    async fn test_list_only_mine() {
        let owner = UserId::new_v7();
        let store = Arc::new(MockPostStore::new());
        store.seed_post(TestPostBuilder::new().with_owner(owner).build()).await;
        store.seed_post(TestPostBuilder::new().build()).await;
        let service = service(store);

        let page = service
            .list_posts(
                PostQuery {
                    owner_id: Some(owner),
                    ..Default::default()
                },
                PageRequest::default(),
            )
            .await
            .unwrap();

        assert_eq!(page.pagination.total, 1);
        assert_eq!(page.posts[0].post.owner_id, owner);
    }

    #[tokio::test]
    async fn test_list_paginates() {
        let store = Arc::new(MockPostStore::new());
        for _ in 0..7 {
            store.seed_post(TestPostBuilder::new().build()).await;
        }
        let service = service(store);

        let page = service
            .list_posts(PostQuery::default(), PageRequest::new(2, 5))
            .await
            .unwrap();

        assert_eq!(page.pagination.total, 7);
        assert_eq!(page.pagination.total_pages, 2);
        assert_eq!(page.posts.len(), 2);
        assert!(page.pagination.has_prev_page);
        assert!(!page.pagination.has_next_page);
    }

    #[tokio::test]
    async fn test_list_categories() {
        let store = Arc::new(
            MockPostStore::with_categories(vec![
                Category::new("Electronics"),
                Category::new("Keys"),
            ])
            .await,
        );
        let service = service(store);

        let categories = service.list_categories().await.unwrap();
        assert_eq!(categories.len(), 2);
    }
}
