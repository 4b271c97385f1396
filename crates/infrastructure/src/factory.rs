//! Assembles the shared authenticated client from settings.

use std::sync::Arc;

use tandem_application::{
    AuthenticatedClient, CoalescingRefresh, InterceptorOptions, RefreshProcedure, TokenStore,
};
use tracing::info;

use crate::adapters::ReqwestHttpClient;
use crate::auth::HttpRefreshProcedure;
use crate::error::InfrastructureError;
use crate::settings::ClientSettings;

/// Builds the client every component should share.
///
/// The token store is an explicit argument: clients built from different
/// stores never see each other's credentials.
///
/// # Errors
/// Returns an error for invalid settings or if the transport cannot be built.
pub fn build_client(
    settings: &ClientSettings,
    store: TokenStore,
) -> Result<AuthenticatedClient, InfrastructureError> {
    let base_url = settings.base_url()?;
    let refresh_url = settings.refresh_url()?;

    let transport = Arc::new(ReqwestHttpClient::new(base_url, settings.timeout())?);

    let procedure = Arc::new(HttpRefreshProcedure::new(
        refresh_url,
        store.clone(),
        settings.timeout(),
    ));
    let refresh: Arc<dyn RefreshProcedure> = if settings.coalesce_refresh {
        Arc::new(CoalescingRefresh::new(procedure))
    } else {
        procedure
    };

    let options = InterceptorOptions {
        scheme: settings.auth_scheme,
        on_refresh_failure: settings.refresh_failure_policy,
    };

    info!(
        base_url = %settings.base_url,
        scheme = ?options.scheme,
        coalesce = settings.coalesce_refresh,
        "authenticated client ready"
    );
    Ok(AuthenticatedClient::authenticated(
        transport, store, refresh, options,
    ))
}
