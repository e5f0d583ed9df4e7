#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use rivals_api::config::ServerConfig;
use rivals_api::router::build_app_router;
use rivals_api::state::AppState;
use rivals_core::sanitize::SanitizeOptions;
use rivals_core::types::{HeroId, VillainId};
use rivals_db::models::hero::{Hero, NewHero};
use rivals_db::models::villain::{NewVillain, Villain, VillainFields};
use rivals_db::{HeroStore, StoreError, VillainStore};
use validator::Validate;

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: Vec::new(),
        request_timeout_secs: 30,
        sanitize: SanitizeOptions::default(),
    }
}

/// Build the full application router over the given store doubles.
///
/// Goes through the same [`build_app_router`] as `main.rs`, so the tests
/// exercise the production middleware stack.
pub fn build_test_app(heroes: Arc<MemoryHeroStore>, villains: Arc<MemoryVillainStore>) -> Router {
    build_test_app_with_config(test_config(), heroes, villains)
}

/// Like [`build_test_app`], with a caller-supplied configuration.
pub fn build_test_app_with_config(
    config: ServerConfig,
    heroes: Arc<MemoryHeroStore>,
    villains: Arc<MemoryVillainStore>,
) -> Router {
    let state = AppState {
        heroes,
        villains,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Fresh empty stores plus an app built over them.
pub fn fresh_app() -> (Router, Arc<MemoryHeroStore>, Arc<MemoryVillainStore>) {
    let heroes = Arc::new(MemoryHeroStore::default());
    let villains = Arc::new(MemoryVillainStore::default());
    let app = build_test_app(Arc::clone(&heroes), Arc::clone(&villains));
    (app, heroes, villains)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send `body` verbatim with the given content type.
pub async fn send_raw(
    app: Router,
    method: Method,
    uri: &str,
    content_type: &str,
    body: &str,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", content_type)
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Store doubles
// ---------------------------------------------------------------------------

fn refused() -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused")
}

/// In-memory `heroes` table that counts calls and can be taken offline.
#[derive(Default)]
pub struct MemoryHeroStore {
    rows: Mutex<Vec<Hero>>,
    calls: AtomicUsize,
    offline: AtomicBool,
}

impl MemoryHeroStore {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn rows(&self) -> Vec<Hero> {
        self.rows.lock().unwrap().clone()
    }

    pub fn go_offline(&self) {
        self.offline.store(true, Ordering::SeqCst);
    }

    fn enter(&self) -> Result<(), StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Sql(sqlx::Error::Io(refused())));
        }
        Ok(())
    }

    fn modify(&self, id: HeroId, f: impl FnOnce(&mut Hero)) -> Option<Hero> {
        let mut rows = self.rows.lock().unwrap();
        let hero = rows.iter_mut().find(|h| h.id == id)?;
        f(hero);
        Some(hero.clone())
    }
}

#[async_trait]
impl HeroStore for MemoryHeroStore {
    async fn list(&self) -> Result<Vec<Hero>, StoreError> {
        self.enter()?;
        Ok(self.rows())
    }

    async fn find_by_id(&self, id: HeroId) -> Result<Option<Hero>, StoreError> {
        self.enter()?;
        Ok(self.rows().into_iter().find(|h| h.id == id))
    }

    async fn create(&self, input: &NewHero) -> Result<Hero, StoreError> {
        self.enter()?;
        let mut rows = self.rows.lock().unwrap();
        let hero = Hero {
            id: rows.len() as HeroId + 1,
            first_name: input.first_name.clone(),
            last_name: input.last_name.clone(),
            image: input.image.clone(),
            active: true,
        };
        rows.push(hero.clone());
        Ok(hero)
    }

    async fn update(&self, id: HeroId, input: &NewHero) -> Result<Option<Hero>, StoreError> {
        self.enter()?;
        Ok(self.modify(id, |hero| {
            hero.first_name = input.first_name.clone();
            hero.last_name = input.last_name.clone();
            hero.image = input.image.clone();
        }))
    }

    async fn retire(&self, id: HeroId) -> Result<Option<Hero>, StoreError> {
        self.enter()?;
        Ok(self.modify(id, |hero| hero.active = false))
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        self.enter()
    }
}

/// In-memory `villains` collection that counts calls and can be taken
/// offline. Writes go through the same field constraints as the real store.
#[derive(Default)]
pub struct MemoryVillainStore {
    docs: Mutex<Vec<Villain>>,
    calls: AtomicUsize,
    offline: AtomicBool,
}

impl MemoryVillainStore {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn docs(&self) -> Vec<Villain> {
        self.docs.lock().unwrap().clone()
    }

    pub fn go_offline(&self) {
        self.offline.store(true, Ordering::SeqCst);
    }

    fn enter(&self) -> Result<(), StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Mongo(mongodb::error::Error::from(refused())));
        }
        Ok(())
    }

    fn modify(&self, id: &VillainId, f: impl FnOnce(&mut Villain)) -> Option<Villain> {
        let mut docs = self.docs.lock().unwrap();
        let villain = docs.iter_mut().find(|v| &v.id == id)?;
        f(villain);
        Some(villain.clone())
    }
}

#[async_trait]
impl VillainStore for MemoryVillainStore {
    async fn list(&self) -> Result<Vec<Villain>, StoreError> {
        self.enter()?;
        Ok(self.docs())
    }

    async fn search_by_name(&self, term: &str) -> Result<Vec<Villain>, StoreError> {
        self.enter()?;
        let term = term.to_lowercase();
        Ok(self
            .docs()
            .into_iter()
            .filter(|v| v.name.to_lowercase().contains(&term))
            .collect())
    }

    async fn create(&self, input: &NewVillain) -> Result<Villain, StoreError> {
        self.enter()?;
        input.validate()?;
        let mut docs = self.docs.lock().unwrap();
        let id = VillainId::parse(&format!("{:024x}", docs.len() + 1)).unwrap();
        let villain = Villain {
            id,
            name: input.name.clone(),
            description: input.description.clone(),
            personal_deadliness: input.personal_deadliness,
            influence: input.influence,
            is_recovering: false,
            image: input.image.clone(),
        };
        docs.push(villain.clone());
        Ok(villain)
    }

    async fn update(
        &self,
        id: &VillainId,
        patch: &VillainFields,
    ) -> Result<Option<Villain>, StoreError> {
        self.enter()?;
        patch.validate()?;
        Ok(self.modify(id, |villain| {
            if let Some(name) = &patch.name {
                villain.name = name.clone();
            }
            if let Some(description) = &patch.description {
                villain.description = description.clone();
            }
            if let Some(deadliness) = patch.personal_deadliness {
                villain.personal_deadliness = deadliness;
            }
            if let Some(influence) = patch.influence {
                villain.influence = influence;
            }
            if let Some(image) = &patch.image {
                villain.image = Some(image.clone());
            }
        }))
    }

    async fn defeat(&self, id: &VillainId) -> Result<Option<Villain>, StoreError> {
        self.enter()?;
        Ok(self.modify(id, |villain| villain.is_recovering = true))
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        self.enter()
    }
}
