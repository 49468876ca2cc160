use serde::{Deserialize, Serialize};

/// Closed role enumeration for the GEM portal.
///
/// `Guest` is the sentinel for "no session" — it never appears in a
/// protected allow-list and is the fallback for missing or unrecognized
/// role data from the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "SUPER_ADMIN")]
    SuperAdmin,
    #[serde(rename = "ADMIN")]
    Admin,
    #[serde(rename = "DOCENTE")]
    Docente,
    #[serde(rename = "ALUMNO")]
    Alumno,
    #[default]
    #[serde(rename = "GUEST")]
    Guest,
}

impl Role {
    /// Parse a wire value, mapping anything unrecognized to `Guest`.
    pub fn from_str_lossy(value: &str) -> Role {
        match value {
            "SUPER_ADMIN" => Role::SuperAdmin,
            "ADMIN" => Role::Admin,
            "DOCENTE" => Role::Docente,
            "ALUMNO" => Role::Alumno,
            _ => Role::Guest,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "SUPER_ADMIN",
            Role::Admin => "ADMIN",
            Role::Docente => "DOCENTE",
            Role::Alumno => "ALUMNO",
            Role::Guest => "GUEST",
        }
    }

    /// Human-readable label shown in the UI.
    pub fn label(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "Super Administrador",
            Role::Admin => "Administrador",
            Role::Docente => "Docente",
            Role::Alumno => "Alumno",
            Role::Guest => "Invitado",
        }
    }

    pub fn is_guest(&self) -> bool {
        matches!(self, Role::Guest)
    }
}

/// Deserialize a role field tolerantly: `null`, missing, or unknown values
/// all become `Guest` instead of failing the whole identity record.
pub(crate) fn lossy<'de, D>(deserializer: D) -> Result<Role, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().map(Role::from_str_lossy).unwrap_or_default())
}
