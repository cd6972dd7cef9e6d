//! Recovery for uploads that collide with a generated asset.
//!
//! When a theme contains `X.liquid`, the server renders it into `X` and
//! refuses direct writes to `X` with a 422 ("Cannot overwrite generated
//! asset X"). Uploading `X` therefore requires deleting `X.liquid` first.
//! The upload is retried exactly once; any failure of the delete or the
//! retry is returned as is.

use crate::theme::errors::ThemeError;
use crate::theme::resources::Asset;
use crate::theme::ThemeClient;

const GENERATED_ASSET_CONFLICT: &str = "cannot overwrite generated asset";

/// Returns `true` if the error is the server refusing to overwrite an asset
/// generated from a Liquid template.
#[must_use]
pub fn is_generated_asset_conflict(error: &ThemeError) -> bool {
    matches!(
        error,
        ThemeError::Validation { code: 422, .. } | ThemeError::Api { code: 422, .. }
    ) && error
        .to_string()
        .to_lowercase()
        .contains(GENERATED_ASSET_CONFLICT)
}

/// Returns the key of the Liquid template an asset is generated from.
#[must_use]
pub fn liquid_source_key(key: &str) -> String {
    format!("{key}.liquid")
}

pub(crate) async fn update_with_conflict_retry(
    client: &ThemeClient,
    asset: &Asset,
) -> Result<(), ThemeError> {
    match client.put_asset(asset).await {
        Err(error) if is_generated_asset_conflict(&error) => {
            let source = liquid_source_key(&asset.key);
            tracing::warn!(
                key = %asset.key,
                source = %source,
                "asset is generated from a liquid template, deleting the template and retrying"
            );
            client.delete_asset(&Asset::with_key(source)).await?;
            client.put_asset(asset).await
        }
        result => result,
    }
}
