use crate::{
    defs::{LogoutFailure, TransportError, HOME_PATH, LOGOUT_ENDPOINT, LOGOUT_FAILED_MESSAGE},
    host::Host,
};
use http::StatusCode;

/// How a logout request ended, as far as the user is concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogoutOutcome {
    Success,
    /// The endpoint is gone, which happens when the session was already
    /// removed. Treated like a success.
    ToleratedNotFound,
    Failure(LogoutFailure),
}

impl LogoutOutcome {
    pub fn from_response(response: Result<StatusCode, TransportError>) -> Self {
        match response {
            Ok(StatusCode::OK) => LogoutOutcome::Success,
            Ok(StatusCode::NOT_FOUND) => LogoutOutcome::ToleratedNotFound,
            Ok(status) => LogoutOutcome::Failure(LogoutFailure::UnexpectedStatus(status)),
            Err(e) => LogoutOutcome::Failure(e.into()),
        }
    }
}

/// Posts to the logout endpoint, then either sends the browser home or
/// tells the user something went wrong.
pub async fn logout<H: Host>(host: &H) -> LogoutOutcome {
    log::trace!("posting to {LOGOUT_ENDPOINT}");
    let outcome = LogoutOutcome::from_response(host.post(LOGOUT_ENDPOINT).await);
    match &outcome {
        LogoutOutcome::Success => {
            log::trace!("user logged out");
            host.navigate(HOME_PATH);
        }
        LogoutOutcome::ToleratedNotFound => {
            log::debug!("logout endpoint not found, assuming session already ended");
            host.navigate(HOME_PATH);
        }
        LogoutOutcome::Failure(e) => {
            log::warn!("{e}");
            host.alert(LOGOUT_FAILED_MESSAGE);
        }
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryHost;
    use futures::executor::block_on;

    #[test]
    fn classifies_statuses() {
        assert_eq!(
            LogoutOutcome::from_response(Ok(StatusCode::OK)),
            LogoutOutcome::Success
        );
        assert_eq!(
            LogoutOutcome::from_response(Ok(StatusCode::NOT_FOUND)),
            LogoutOutcome::ToleratedNotFound
        );
        assert_eq!(
            LogoutOutcome::from_response(Ok(StatusCode::FORBIDDEN)),
            LogoutOutcome::Failure(LogoutFailure::UnexpectedStatus(StatusCode::FORBIDDEN))
        );
        // other success codes are not the one the server sends
        assert_eq!(
            LogoutOutcome::from_response(Ok(StatusCode::NO_CONTENT)),
            LogoutOutcome::Failure(LogoutFailure::UnexpectedStatus(StatusCode::NO_CONTENT))
        );
    }

    #[test]
    fn success_navigates_home() {
        let host = MemoryHost::new();
        host.respond(Ok(StatusCode::OK));
        assert_eq!(block_on(logout(&host)), LogoutOutcome::Success);
        assert_eq!(host.requests(), vec![LOGOUT_ENDPOINT]);
        assert_eq!(host.navigations(), vec![HOME_PATH]);
        assert!(host.alerts().is_empty());
    }

    #[test]
    fn not_found_navigates_home() {
        let host = MemoryHost::new();
        host.respond(Ok(StatusCode::NOT_FOUND));
        assert_eq!(block_on(logout(&host)), LogoutOutcome::ToleratedNotFound);
        assert_eq!(host.navigations(), vec![HOME_PATH]);
        assert!(host.alerts().is_empty());
    }

    #[test]
    fn server_error_alerts() {
        let host = MemoryHost::new();
        host.respond(Ok(StatusCode::INTERNAL_SERVER_ERROR));
        let outcome = block_on(logout(&host));
        assert!(matches!(
            outcome,
            LogoutOutcome::Failure(LogoutFailure::UnexpectedStatus(
                StatusCode::INTERNAL_SERVER_ERROR
            ))
        ));
        assert!(host.navigations().is_empty());
        assert_eq!(host.alerts(), vec![LOGOUT_FAILED_MESSAGE]);
    }

    #[test]
    fn transport_error_alerts() {
        let host = MemoryHost::new();
        host.respond(Err(TransportError("connection refused".to_string())));
        let outcome = block_on(logout(&host));
        assert!(matches!(
            outcome,
            LogoutOutcome::Failure(LogoutFailure::Transport(_))
        ));
        assert!(host.navigations().is_empty());
        assert_eq!(host.alerts(), vec![LOGOUT_FAILED_MESSAGE]);
    }
}
