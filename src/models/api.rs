//! Response envelopes shared by every endpoint.

use serde::Deserialize;

use crate::repository::errors::{RepositoryError, RepositoryResult};

/// `{ success, data?, message? }` wrapper around every payload.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Returns the payload of a successful response.
    ///
    /// `success: false` and a missing payload are both failures.
    pub fn into_result(self) -> RepositoryResult<T> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            (true, None) => Err(RepositoryError::Decode(
                "successful response without data".to_string(),
            )),
            (false, _) => Err(RepositoryError::Api(
                self.message
                    .unwrap_or_else(|| "request was not successful".to_string()),
            )),
        }
    }
}

/// Pagination metadata of a list response.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
pub struct PaginationMeta {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub pages: usize,
}

/// Payload of `GET /{resource}`.
#[derive(Debug, Deserialize)]
pub struct PageData<T> {
    pub items: Vec<T>,
    pub pagination: PaginationMeta,
}

/// Payload of `GET /{resource}/{id}/{subcollection}`.
#[derive(Debug, Deserialize)]
pub struct ItemsData<T> {
    pub items: Vec<T>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::location::ApiLocation;

    #[test]
    fn unsuccessful_response_carries_message() {
        let response: ApiResponse<ItemsData<u32>> =
            serde_json::from_str(r#"{"success": false, "message": "FPO not found"}"#)
                .expect("valid envelope");

        assert_eq!(
            response.into_result().map(|d| d.items),
            Err(RepositoryError::Api("FPO not found".to_string()))
        );
    }

    #[test]
    fn success_without_data_is_malformed() {
        let response: ApiResponse<ItemsData<u32>> =
            serde_json::from_str(r#"{"success": true}"#).expect("valid envelope");

        assert!(matches!(
            response.into_result(),
            Err(RepositoryError::Decode(_))
        ));
    }

    #[test]
    fn page_payload_is_unwrapped() {
        let response: ApiResponse<PageData<u32>> = serde_json::from_str(
            r#"{"success": true, "data": {"items": [1, 2], "pagination": {"page": 2, "limit": 2, "total": 9, "pages": 5}}}"#,
        )
        .expect("valid envelope");

        let page = response.into_result().expect("successful response");
        assert_eq!(page.items, vec![1, 2]);
        assert_eq!(page.pagination.pages, 5);
    }

    #[test]
    fn envelope_decodes_payload_without_default() {
        let response: ApiResponse<ApiLocation> =
            serde_json::from_str(r#"{"success": true, "data": {"id": 3, "name": "Pune"}}"#)
                .expect("valid envelope");

        let location = response.into_result().expect("successful response");
        assert_eq!(location.name, "Pune");
        assert_eq!(location.code, None);
    }
}
