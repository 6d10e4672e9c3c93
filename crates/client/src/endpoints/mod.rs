//! REST API endpoint implementations.
//!
//! Each function is a single HTTP exchange: it takes the shared
//! `reqwest::Client`, the base URL and a bearer token, and returns typed
//! models. Session renewal lives one layer up in [`crate::client`].

mod auth;
mod context;
mod datamodels;
mod indexes;
mod macros;
mod passwords;
mod request;
mod server;
mod tags;
pub mod url_encoding;

pub use auth::login;
pub use context::get_current_context;
pub use datamodels::{list_datamodel_configs, update_datamodel_config};
pub use indexes::list_indexes;
pub use macros::{list_macros, update_macro_definition};
pub use passwords::{create_password, credential_entity, delete_password, get_password};
pub use request::send_request_with_retry;
pub use server::get_server_info;
pub use tags::list_tags;
pub use url_encoding::encode_path_segment;

/// Build a namespaced path: `{base}/servicesNS/{owner}/{app}/{rest}`.
pub(crate) fn namespaced_url(base_url: &str, owner: &str, app: &str, rest: &str) -> String {
    format!(
        "{}/servicesNS/{}/{}/{}",
        base_url,
        encode_path_segment(owner),
        encode_path_segment(app),
        rest
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespaced_url_encodes_owner_and_app() {
        assert_eq!(
            namespaced_url("https://h:8089", "nobody", "Splunk_SA_CIM", "data/models"),
            "https://h:8089/servicesNS/nobody/Splunk_SA_CIM/data/models"
        );
        assert_eq!(
            namespaced_url("https://h:8089", "a b", "x/y", "admin/macros"),
            "https://h:8089/servicesNS/a%20b/x%2Fy/admin/macros"
        );
    }
}
