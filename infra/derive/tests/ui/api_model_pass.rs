use concil_derive::api_model;

#[api_model(deny_unknown_fields = false)]
pub struct Profile {
    pub display_name: String,
    pub is_active: bool,
}

#[api_model]
pub struct Strict {
    pub first_field: u32,
}

fn main() {
    let profile: Profile =
        serde_json::from_str(r#"{"displayName":"Ana","isActive":true,"extra":1}"#).unwrap();
    assert_eq!(profile.display_name, "Ana");
    assert!(profile.is_active);

    let json = serde_json::to_string(&profile).unwrap();
    assert!(json.contains("displayName"));

    assert!(serde_json::from_str::<Strict>(r#"{"firstField":1,"extra":2}"#).is_err());
    assert!(serde_json::from_str::<Strict>(r#"{"firstField":1}"#).is_ok());
}
