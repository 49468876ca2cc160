use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::role::{self, Role};

/// CURP layout: four letters, birth date, sex marker, five letters,
/// homonym digit, check digit.
static CURP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z]{4}\d{6}[HM][A-Z]{5}[0-9A-Z]\d$").expect("CURP pattern is valid")
});

/// The authenticated user's profile record.
///
/// The backend emits camelCase field names (`apellidoPaterno`) but has been
/// observed returning snake_case variants as well; both deserialize.
/// Serialization always uses the camelCase names, so persisted identities
/// round-trip to equal values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,

    /// 18-character CURP, the primary login key.
    pub curp: String,

    #[serde(rename = "correo", default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(rename = "rol", default, deserialize_with = "role::lossy")]
    pub role: Role,

    #[serde(rename = "nombre")]
    pub first_name: String,

    #[serde(rename = "apellidoPaterno", alias = "apellido_paterno")]
    pub paternal_surname: String,

    #[serde(
        rename = "apellidoMaterno",
        alias = "apellido_materno",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub maternal_surname: Option<String>,

    #[serde(rename = "telefono", default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// A login response that omits this field implies an active account.
    #[serde(rename = "estaActivo", alias = "esta_activo", default = "default_active")]
    pub is_active: bool,

    #[serde(
        rename = "debeCambiarContrasena",
        alias = "debe_cambiar_contrasena",
        default
    )]
    pub must_change_password: bool,

    #[serde(
        rename = "ultimoAcceso",
        alias = "ultimo_acceso",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub last_login: Option<DateTime<Utc>>,
}

fn default_active() -> bool {
    true
}

impl User {
    /// Full display name: given name plus both surnames.
    pub fn full_name(&self) -> String {
        let mut name = format!("{} {}", self.first_name, self.paternal_surname);
        if let Some(maternal) = &self.maternal_surname {
            name.push(' ');
            name.push_str(maternal);
        }
        name.trim().to_string()
    }

    /// Initials for avatar placeholders.
    pub fn initials(&self) -> String {
        let first = self.first_name.chars().next();
        let last = self.paternal_surname.chars().next();
        first
            .into_iter()
            .chain(last)
            .flat_map(|c| c.to_uppercase())
            .collect()
    }
}

/// Validate the CURP login-key format.
pub fn is_valid_curp(curp: &str) -> bool {
    CURP_RE.is_match(curp)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> User {
        User {
            id: 3,
            curp: "DOCE900101HDFXXX03".to_string(),
            email: Some("docente@gem.edu.mx".to_string()),
            role: Role::Docente,
            first_name: "María".to_string(),
            paternal_surname: "González".to_string(),
            maternal_surname: Some("López".to_string()),
            phone: None,
            is_active: true,
            must_change_password: false,
            last_login: None,
        }
    }

    #[test]
    fn serialization_round_trips() {
        let user = sample();
        let json = serde_json::to_string(&user).unwrap();
        let back: User = serde_json::from_str(&json).unwrap();
        assert_eq!(user, back);
    }

    #[test]
    fn accepts_camel_case_wire_names() {
        let user: User = serde_json::from_str(
            r#"{
                "id": 3,
                "curp": "DOCE900101HDFXXX03",
                "rol": "DOCENTE",
                "nombre": "María",
                "apellidoPaterno": "González",
                "apellidoMaterno": "López",
                "debeCambiarContrasena": false
            }"#,
        )
        .unwrap();
        assert_eq!(user.role, Role::Docente);
        assert_eq!(user.paternal_surname, "González");
        assert!(user.is_active, "active defaults to true when absent");
    }

    #[test]
    fn accepts_snake_case_wire_names() {
        let user: User = serde_json::from_str(
            r#"{
                "id": 4,
                "curp": "ALUM050101HDFXXX04",
                "rol": "ALUMNO",
                "nombre": "Estudiante",
                "apellido_paterno": "Ejemplo",
                "apellido_materno": "Demo",
                "esta_activo": false
            }"#,
        )
        .unwrap();
        assert_eq!(user.role, Role::Alumno);
        assert_eq!(user.maternal_surname.as_deref(), Some("Demo"));
        assert!(!user.is_active);
    }

    #[test]
    fn unknown_role_becomes_guest() {
        let user: User = serde_json::from_str(
            r#"{"id": 9, "curp": "XXXX000101HXXXXX09", "rol": "STAFF",
                "nombre": "X", "apellidoPaterno": "Y"}"#,
        )
        .unwrap();
        assert_eq!(user.role, Role::Guest);
    }

    #[test]
    fn full_name_and_initials() {
        let user = sample();
        assert_eq!(user.full_name(), "María González López");
        assert_eq!(user.initials(), "MG");
    }

    #[test]
    fn curp_format() {
        assert!(is_valid_curp("DOCE900101HDFXXX03"));
        assert!(is_valid_curp("ALUM050101HDFXXX04"));
        assert!(!is_valid_curp("DOCE900101HDFXXX0")); // 17 chars
        assert!(!is_valid_curp("doce900101hdfxxx03")); // lowercase
        assert!(!is_valid_curp("DOCE900101XDFXXX03")); // bad sex marker
    }
}
