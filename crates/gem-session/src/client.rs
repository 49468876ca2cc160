use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Value, json};

use crate::config::Config;
use crate::error::SessionError;
use crate::response;
use crate::role::Role;
use crate::user::User;

/// Result of a successful credential exchange.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: User,
    pub token: String,
}

/// Authentication backend — exchanges a CURP and password for an identity
/// and a bearer credential.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    async fn login(&self, curp: &str, password: &str) -> Result<LoginOutcome, SessionError>;
}

/// Real backend: `POST {api_url}/auth/login`.
pub struct HttpAuthBackend {
    http: reqwest::Client,
    api_url: String,
}

impl HttpAuthBackend {
    pub fn new(api_url: impl Into<String>) -> Self {
        HttpAuthBackend {
            http: reqwest::Client::new(),
            api_url: api_url.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.api_url.clone())
    }
}

#[async_trait]
impl AuthBackend for HttpAuthBackend {
    async fn login(&self, curp: &str, password: &str) -> Result<LoginOutcome, SessionError> {
        let url = format!("{}/auth/login", self.api_url);
        tracing::debug!(curp, %url, "attempting login");

        let res = self
            .http
            .post(&url)
            .json(&json!({ "curp": curp, "contrasena": password }))
            .send()
            .await?;

        if !res.status().is_success() {
            let body: Value = res.json().await.unwrap_or(Value::Null);
            let message = body
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("Credenciales inválidas")
                .to_string();
            tracing::debug!(%message, "login rejected by backend");
            return Err(SessionError::InvalidCredentials(message));
        }

        let body: Value = res.json().await?;
        response::extract_login(&body)
    }
}

/// Demo backend for development without a running API.
///
/// Seeded identities match the backend seeders; any other CURP yields a
/// generic student so the rest of the flow stays exercisable.
pub struct DemoBackend;

#[async_trait]
impl AuthBackend for DemoBackend {
    async fn login(&self, curp: &str, _password: &str) -> Result<LoginOutcome, SessionError> {
        let curp = curp.to_uppercase();
        let user = seeded_user(&curp).unwrap_or_else(|| demo_user(
            999,
            &curp,
            "usuario@gem.edu.mx",
            Role::Alumno,
            "Usuario",
            "Demo",
            None,
        ));
        let token = format!("demo_token_{}", Utc::now().timestamp_millis());
        Ok(LoginOutcome { user, token })
    }
}

/// Select the backend the configuration asks for.
pub fn backend_from_config(config: &Config) -> Arc<dyn AuthBackend> {
    if config.enable_demo_mode {
        Arc::new(DemoBackend)
    } else {
        Arc::new(HttpAuthBackend::from_config(config))
    }
}

fn seeded_user(curp: &str) -> Option<User> {
    match curp {
        "SUPE800101HDFXXX01" => Some(demo_user(
            1,
            curp,
            "superadmin@gem.edu.mx",
            Role::SuperAdmin,
            "Super",
            "Administrador",
            Some("GEM"),
        )),
        "ADMI850101HDFXXX02" => Some(demo_user(
            2,
            curp,
            "admin@gem.edu.mx",
            Role::Admin,
            "Administrador",
            "General",
            Some("GEM"),
        )),
        "DOCE900101HDFXXX03" => Some(demo_user(
            3,
            curp,
            "docente@gem.edu.mx",
            Role::Docente,
            "María",
            "González",
            Some("López"),
        )),
        "ALUM050101HDFXXX04" => Some(demo_user(
            4,
            curp,
            "alumno@gem.edu.mx",
            Role::Alumno,
            "Estudiante",
            "Ejemplo",
            Some("Demo"),
        )),
        _ => None,
    }
}

fn demo_user(
    id: i64,
    curp: &str,
    email: &str,
    role: Role,
    first_name: &str,
    paternal: &str,
    maternal: Option<&str>,
) -> User {
    User {
        id,
        curp: curp.to_string(),
        email: Some(email.to_string()),
        role,
        first_name: first_name.to_string(),
        paternal_surname: paternal.to_string(),
        maternal_surname: maternal.map(str::to_string),
        phone: None,
        is_active: true,
        must_change_password: false,
        last_login: None,
    }
}
