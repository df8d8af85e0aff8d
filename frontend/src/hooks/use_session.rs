use yew::prelude::*;
use shared::Session;
use log::{info, warn};
use crate::services::storage::SessionStore;

pub struct UseSessionResult {
    pub session: Option<Session>,
    pub actions: UseSessionActions,
}

#[derive(Clone, PartialEq)]
pub struct UseSessionActions {
    pub sign_in: Callback<Session>,
    pub sign_out: Callback<()>,
}

#[hook]
pub fn use_session() -> UseSessionResult {
    let session = use_state(SessionStore::load);

    let sign_in = {
        let session = session.clone();
        use_callback((), move |new_session: Session, _| {
            if let Err(e) = SessionStore::save(&new_session) {
                warn!("Session will not survive a reload: {:#}", e);
            }
            info!("Signed in as {} ({})", new_session.email, new_session.role.as_str());
            session.set(Some(new_session));
        })
    };

    let sign_out = {
        let session = session.clone();
        use_callback((), move |_: (), _| {
            SessionStore::clear();
            info!("Signed out");
            session.set(None);
        })
    };

    UseSessionResult {
        session: (*session).clone(),
        actions: UseSessionActions { sign_in, sign_out },
    }
}
