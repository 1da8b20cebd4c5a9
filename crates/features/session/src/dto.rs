//! Payloads exchanged with the external authentication endpoint.

use concil_derive::api_model;
use concil_kernel::domain::{Permission, User};

/// Body of the login request (`POST` with e-mail and password).
#[api_model]
#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub senha: String,
}

/// One permission as returned by the backend.
#[api_model(deny_unknown_fields = false)]
#[derive(Clone, PartialEq, Eq)]
pub struct PermissionPayload {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub operacao: String,
    pub tag: i32,
}

/// Successful login response: bearer token plus profile and permissions.
#[api_model(deny_unknown_fields = false)]
#[derive(Clone, PartialEq, Eq)]
pub struct LoginResponse {
    pub nome: String,
    pub email: String,
    #[serde(default)]
    pub icone: Option<String>,
    #[serde(default)]
    pub permissoes: Vec<PermissionPayload>,
    #[serde(default)]
    pub is_suporte: bool,
    pub token: String,
}

impl From<PermissionPayload> for Permission {
    fn from(payload: PermissionPayload) -> Self {
        Self::new(payload.id, payload.operacao, payload.tag)
    }
}

impl From<LoginResponse> for User {
    fn from(response: LoginResponse) -> Self {
        Self {
            name: response.nome,
            email: response.email,
            icon: response.icone,
            is_support: response.is_suporte,
            permissions: response.permissoes.into_iter().map(Permission::from).collect(),
            token: response.token,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use concil_kernel::domain::Tag;

    #[test]
    fn login_response_maps_to_user() {
        let response: LoginResponse = serde_json::from_str(
            r#"{
                "nome": "Carlos Lima",
                "email": "carlos@conciliador.com.br",
                "icone": "avatars/carlos.png",
                "permissoes": [
                    { "id": 1, "operacao": "Listar lotes", "tag": 1016 },
                    { "id": 2, "operacao": "Liquidar lote", "tag": 1020 }
                ],
                "isSuporte": false,
                "token": "eyJhbGciOi",
                "expiraEm": 3600
            }"#,
        )
        .unwrap();

        let user = User::from(response);
        assert_eq!(user.name, "Carlos Lima");
        assert_eq!(user.icon.as_deref(), Some("avatars/carlos.png"));
        assert_eq!(user.tags().collect::<Vec<_>>(), vec![Tag(1016), Tag(1020)]);
        assert_eq!(user.permissions[1].operation, "Liquidar lote");
    }

    #[test]
    fn credentials_are_strict() {
        let json = serde_json::to_value(Credentials {
            email: "a@b.c".to_owned(),
            senha: "segredo".to_owned(),
        })
        .unwrap();
        assert_eq!(json["senha"], "segredo");

        assert!(serde_json::from_str::<Credentials>(r#"{"email":"a","senha":"b","x":1}"#).is_err());
    }
}
