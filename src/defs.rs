use http::StatusCode;
use thiserror::Error as ThisError;

/// Registry key the shell uses to look up the system menu widget
pub const SYSTEM_MENU_KEY: &str = "solidcoredata.org/base/spa/system-menu";

/// Logout endpoint, relative to the current document
pub const LOGOUT_ENDPOINT: &str = "api/logout";

/// Path the browser is sent to after a logout
pub const HOME_PATH: &str = "/";

/// Text shown when the logout request fails for any reason
pub const LOGOUT_FAILED_MESSAGE: &str = "Unknown error, application may be down.";

/// Text of the system menu container
pub const ROOT_TEXT: &str = "hello world";

/// Text of the logout control
pub const LOGOUT_TEXT: &str = "logout";

/// Name of the session cookie shared by the client and the dev server
pub const SESSION_COOKIE: &str = "SESSIONID";

/// The logout request never produced an HTTP status.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
#[error("logout request failed: {0}")]
pub struct TransportError(pub String);

/// Why a logout attempt did not complete.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum LogoutFailure {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("unexpected logout response status {0}")]
    UnexpectedStatus(StatusCode),
}

#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum WidgetError {
    #[error("no widget registered under {0:?}")]
    UnknownWidget(String),
    #[error("widget config is invalid: {0}")]
    InvalidConfig(String),
    #[error("browser global `{0}` is not available")]
    MissingGlobal(&'static str),
}
