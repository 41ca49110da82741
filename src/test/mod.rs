//! In-memory repository doubles plus endpoint-level tests. The doubles
//! mirror the Postgres implementations closely enough to drive the services
//! without a database.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::Utc;
use uuid::Uuid;

use crate::api::error::SystemError;
use crate::modules::credits::INITIAL_CREDITS;
use crate::modules::credits::repository::CreditsRepository;
use crate::modules::credits::schema::{CreditAccountEntity, CreditPlan};
use crate::modules::file::model::NewFileRecord;
use crate::modules::file::repository::FileRepository;
use crate::modules::file::schema::FileEntity;
use crate::modules::profile::model::NewProfile;
use crate::modules::profile::repository::ProfileRepository;
use crate::modules::profile::schema::ProfileEntity;

#[derive(Default)]
pub struct InMemoryFileRepo {
    files: Mutex<Vec<FileEntity>>,
    fail_saves_after: Option<usize>,
    save_count: AtomicUsize,
}

impl InMemoryFileRepo {
    /// A repository whose save starts failing after `n` successful saves,
    /// for exercising mid-batch failures.
    pub fn failing_after(n: usize) -> Self {
        Self { fail_saves_after: Some(n), ..Default::default() }
    }
}

#[async_trait::async_trait]
impl FileRepository for InMemoryFileRepo {
    async fn save(&self, file: &NewFileRecord) -> Result<FileEntity, SystemError> {
        let attempt = self.save_count.fetch_add(1, Ordering::SeqCst);
        if let Some(limit) = self.fail_saves_after {
            if attempt >= limit {
                return Err(SystemError::DatabaseError("insert failed".into()));
            }
        }

        let entity = FileEntity {
            id: Uuid::now_v7(),
            owner_id: file.owner_id.clone(),
            disk_location: file.disk_location.clone(),
            declared_name: file.declared_name.clone(),
            size: file.size,
            content_type: file.content_type.clone(),
            is_public: false,
            uploaded_at: Utc::now(),
        };
        self.files.lock().unwrap().push(entity.clone());
        Ok(entity)
    }

    async fn find_by_id(&self, file_id: &Uuid) -> Result<Option<FileEntity>, SystemError> {
        Ok(self.files.lock().unwrap().iter().find(|f| f.id == *file_id).cloned())
    }

    async fn find_by_owner(&self, owner_id: &str) -> Result<Vec<FileEntity>, SystemError> {
        Ok(self.files.lock().unwrap().iter().filter(|f| f.owner_id == owner_id).cloned().collect())
    }

    async fn delete_by_id(&self, file_id: &Uuid) -> Result<(), SystemError> {
        self.files.lock().unwrap().retain(|f| f.id != *file_id);
        Ok(())
    }

    async fn toggle_public(&self, file_id: &Uuid) -> Result<Option<FileEntity>, SystemError> {
        let mut files = self.files.lock().unwrap();
        match files.iter_mut().find(|f| f.id == *file_id) {
            Some(file) => {
                file.is_public = !file.is_public;
                Ok(Some(file.clone()))
            }
            None => Ok(None),
        }
    }
}

#[derive(Default)]
pub struct InMemoryProfileRepo {
    profiles: Mutex<HashMap<String, ProfileEntity>>,
}

impl InMemoryProfileRepo {
    pub fn with_profiles(subjects: &[&str]) -> Self {
        let repo = Self::default();
        {
            let mut profiles = repo.profiles.lock().unwrap();
            for subject in subjects {
                profiles.insert(
                    subject.to_string(),
                    ProfileEntity {
                        id: Uuid::now_v7(),
                        subject: subject.to_string(),
                        email: format!("{}@example.com", subject),
                        display_name: None,
                        photo_url: None,
                        created_at: Utc::now(),
                    },
                );
            }
        }
        repo
    }
}

#[async_trait::async_trait]
impl ProfileRepository for InMemoryProfileRepo {
    async fn create(&self, profile: &NewProfile) -> Result<ProfileEntity, SystemError> {
        let mut profiles = self.profiles.lock().unwrap();
        if profiles.contains_key(&profile.subject) {
            return Err(SystemError::Conflict(None));
        }

        let entity = ProfileEntity {
            id: Uuid::now_v7(),
            subject: profile.subject.clone(),
            email: profile.email.clone(),
            display_name: profile.display_name.clone(),
            photo_url: profile.photo_url.clone(),
            created_at: Utc::now(),
        };
        profiles.insert(entity.subject.clone(), entity.clone());
        Ok(entity)
    }

    async fn find_by_subject(&self, subject: &str) -> Result<Option<ProfileEntity>, SystemError> {
        Ok(self.profiles.lock().unwrap().get(subject).cloned())
    }
}

#[derive(Default)]
pub struct InMemoryCreditsRepo {
    accounts: Mutex<HashMap<String, CreditAccountEntity>>,
}

impl InMemoryCreditsRepo {
    pub fn with_account(owner_id: &str, credits: i64, plan: CreditPlan) -> Self {
        let repo = Self::default();
        repo.accounts.lock().unwrap().insert(
            owner_id.to_string(),
            CreditAccountEntity {
                id: Uuid::now_v7(),
                owner_id: owner_id.to_string(),
                credits,
                plan,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
        );
        repo
    }

    pub fn balance(&self, owner_id: &str) -> Option<i64> {
        self.accounts.lock().unwrap().get(owner_id).map(|a| a.credits)
    }
}

#[async_trait::async_trait]
impl CreditsRepository for InMemoryCreditsRepo {
    async fn create_initial(
        &self,
        owner_id: &str,
    ) -> Result<Option<CreditAccountEntity>, SystemError> {
        let mut accounts = self.accounts.lock().unwrap();
        if accounts.contains_key(owner_id) {
            return Ok(None);
        }

        let entity = CreditAccountEntity {
            id: Uuid::now_v7(),
            owner_id: owner_id.to_string(),
            credits: INITIAL_CREDITS,
            plan: CreditPlan::Basic,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        accounts.insert(owner_id.to_string(), entity.clone());
        Ok(Some(entity))
    }

    async fn find_by_owner(
        &self,
        owner_id: &str,
    ) -> Result<Option<CreditAccountEntity>, SystemError> {
        Ok(self.accounts.lock().unwrap().get(owner_id).cloned())
    }

    async fn consume_one(&self, owner_id: &str) -> Result<Option<i64>, SystemError> {
        let mut accounts = self.accounts.lock().unwrap();
        match accounts.get_mut(owner_id) {
            Some(account) if account.credits > 0 => {
                account.credits -= 1;
                account.updated_at = Utc::now();
                Ok(Some(account.credits))
            }
            _ => Ok(None),
        }
    }
}

mod endpoints {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::http::header;
    use actix_web::{App, middleware::from_fn, test, web};
    use tempfile::TempDir;

    use super::{InMemoryCreditsRepo, InMemoryFileRepo, InMemoryProfileRepo};
    use crate::middlewares::authentication;
    use crate::modules::credits::schema::CreditPlan;
    use crate::modules::credits::service::CreditsService;
    use crate::modules::file::service::FileService;
    use crate::modules::file::storage::FileStorage;
    use crate::modules::file::{model::IncomingFile, route};
    use crate::modules::profile::service::ProfileService;
    use crate::utils::Claims;

    const OWNER: &str = "user_2x9qTzA";

    fn init_test_env() {
        std::env::set_var("SECRET_KEY", "test-secret");
        std::env::set_var("DATABASE_URL", "postgres://localhost/unused");
    }

    fn bearer(subject: &str) -> (&'static str, String) {
        let token = Claims::new(subject, 3600).encode(b"test-secret").unwrap();
        ("Authorization", format!("Bearer {}", token))
    }

    struct Stack {
        _temp_dir: TempDir,
        file_repo: Arc<InMemoryFileRepo>,
        credits_repo: Arc<InMemoryCreditsRepo>,
        profile_repo: Arc<InMemoryProfileRepo>,
        storage: FileStorage,
    }

    impl Stack {
        fn with_credits(credits: i64) -> Self {
            let temp_dir = TempDir::new().unwrap();
            let storage = FileStorage::new(temp_dir.path()).unwrap();
            Stack {
                _temp_dir: temp_dir,
                file_repo: Arc::new(InMemoryFileRepo::default()),
                credits_repo: Arc::new(InMemoryCreditsRepo::with_account(
                    OWNER,
                    credits,
                    CreditPlan::Basic,
                )),
                profile_repo: Arc::new(InMemoryProfileRepo::with_profiles(&[OWNER])),
                storage,
            }
        }

        fn file_service(&self) -> FileService<InMemoryFileRepo, InMemoryCreditsRepo> {
            FileService::with_dependencies(
                self.file_repo.clone(),
                self.storage.clone(),
                ProfileService::with_dependencies(self.profile_repo.clone()),
                CreditsService::with_dependencies(self.credits_repo.clone()),
            )
        }
    }

    /// Build the /files tree exactly as the server wires it: public routes
    /// first, then the authenticated scope.
    macro_rules! files_app {
        ($stack:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($stack.file_service()))
                    .app_data(web::Data::new(CreditsService::with_dependencies(
                        $stack.credits_repo.clone(),
                    )))
                    .service(
                        web::scope("/files")
                            .configure(
                                route::public_api_configure::<InMemoryFileRepo, InMemoryCreditsRepo>,
                            )
                            .service(
                                web::scope("")
                                    .wrap(from_fn(authentication))
                                    .configure(
                                        route::configure::<InMemoryFileRepo, InMemoryCreditsRepo>,
                                    ),
                            ),
                    ),
            )
        };
    }

    fn multipart_body(boundary: &str, parts: &[(&str, &str, &[u8])]) -> Vec<u8> {
        let mut body = Vec::new();
        for (filename, content_type, bytes) in parts {
            body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
            body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"files\"; filename=\"{}\"\r\n",
                    filename
                )
                .as_bytes(),
            );
            body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{}--\r\n", boundary).as_bytes());
        body
    }

    #[actix_web::test]
    async fn upload_stores_the_batch_and_reports_the_remaining_balance() {
        init_test_env();
        let stack = Stack::with_credits(3);
        let app = files_app!(stack).await;

        let boundary = "qZx7mB0tPa";
        let body = multipart_body(
            boundary,
            &[("a.txt", "text/plain", b"hello"), ("b.png", "image/png", &[0u8; 200])],
        );

        let req = test::TestRequest::post()
            .uri("/files/upload")
            .insert_header(bearer(OWNER))
            .insert_header((
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", boundary),
            ))
            .set_payload(body)
            .to_request();

        let value: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        let files = value["files"].as_array().unwrap();
        assert_eq!(files.len(), 2);
        assert_ne!(files[0]["id"], files[1]["id"]);
        assert_eq!(files[0]["name"], "a.txt");
        assert_eq!(files[0]["size"], 5);
        assert_eq!(files[0]["type"], "text/plain");
        assert_eq!(files[1]["name"], "b.png");
        assert_eq!(files[1]["size"], 200);
        assert!(files.iter().all(|f| f["isPublic"] == false));
        assert_eq!(value["remainingCredits"], 1);
    }

    #[actix_web::test]
    async fn upload_without_enough_credits_is_payment_required() {
        init_test_env();
        let stack = Stack::with_credits(1);
        let app = files_app!(stack).await;

        let boundary = "qZx7mB0tPa";
        let body = multipart_body(
            boundary,
            &[("a.txt", "text/plain", b"a"), ("b.txt", "text/plain", b"b")],
        );

        let req = test::TestRequest::post()
            .uri("/files/upload")
            .insert_header(bearer(OWNER))
            .insert_header((
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", boundary),
            ))
            .set_payload(body)
            .to_request();

        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::PAYMENT_REQUIRED);
        assert_eq!(stack.credits_repo.balance(OWNER), Some(1));
    }

    #[actix_web::test]
    async fn download_serves_the_bytes_as_an_attachment_without_auth() {
        init_test_env();
        let stack = Stack::with_credits(3);

        // seed one stored file through the service
        let saved = stack
            .file_service()
            .upload_files(
                OWNER,
                vec![IncomingFile {
                    declared_name: "notes.txt".to_string(),
                    content_type: "text/plain".to_string(),
                    bytes: b"hello".to_vec(),
                }],
            )
            .await
            .unwrap();

        let app = files_app!(stack).await;
        let req =
            test::TestRequest::get().uri(&format!("/files/download/{}", saved[0].id)).to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            res.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/octet-stream"
        );
        let disposition =
            res.headers().get(header::CONTENT_DISPOSITION).unwrap().to_str().unwrap();
        assert!(disposition.contains("attachment"));
        assert!(disposition.contains("notes.txt"));
        assert_eq!(test::read_body(res).await, b"hello".as_ref());
    }

    #[actix_web::test]
    async fn public_metadata_for_an_unknown_id_is_not_found() {
        init_test_env();
        let stack = Stack::with_credits(3);
        let app = files_app!(stack).await;

        let req = test::TestRequest::get()
            .uri(&format!("/files/public/{}", uuid::Uuid::now_v7()))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["message"], "Unable to get the file");
    }

    #[actix_web::test]
    async fn owned_file_routes_require_a_token() {
        init_test_env();
        let stack = Stack::with_credits(3);
        let app = files_app!(stack).await;

        let req = test::TestRequest::get().uri("/files/my").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
