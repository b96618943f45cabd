use std::sync::Arc;
use tapguard_application::use_cases::ReloadBlockListsUseCase;

#[derive(Clone)]
pub struct AppState {
    pub reload: Arc<ReloadBlockListsUseCase>,
}
