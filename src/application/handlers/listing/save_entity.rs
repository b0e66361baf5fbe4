//! SaveEntityHandler - Command handler for create and update forms.

use std::sync::Arc;

use tracing::debug;

use super::list_controller::ListController;
use crate::domain::foundation::EntityId;
use crate::domain::listing::{Draft, ListError, ListFeature, Mutation};
use crate::ports::{ErrorNotifier, ListResource, PermissionChecker};

/// Command submitted by a create or edit form.
#[derive(Debug, Clone)]
pub enum SaveEntityCommand<D> {
    Create(D),
    Update { id: EntityId, draft: D },
}

impl<D> SaveEntityCommand<D> {
    pub fn draft(&self) -> &D {
        match self {
            SaveEntityCommand::Create(draft) | SaveEntityCommand::Update { draft, .. } => draft,
        }
    }
}

/// Handler for saving a record and folding the result into the list.
pub struct SaveEntityHandler<L: ListFeature> {
    resource: Arc<dyn ListResource<L>>,
    controller: Arc<ListController<L>>,
    permissions: Arc<dyn PermissionChecker>,
    notifier: Arc<dyn ErrorNotifier>,
}

impl<L: ListFeature> SaveEntityHandler<L> {
    pub fn new(
        resource: Arc<dyn ListResource<L>>,
        controller: Arc<ListController<L>>,
        permissions: Arc<dyn PermissionChecker>,
        notifier: Arc<dyn ErrorNotifier>,
    ) -> Self {
        Self {
            resource,
            controller,
            permissions,
            notifier,
        }
    }

    /// Validates, authorizes and sends the draft.
    ///
    /// Field errors come back as `ListError::Validation` without any request.
    /// Server rejections leave the list and cache untouched so the form can
    /// be corrected and resubmitted.
    pub async fn handle(
        &self,
        cmd: SaveEntityCommand<L::Draft>,
    ) -> Result<Mutation<L::Item>, ListError> {
        // 1. Local validation
        cmd.draft().validate()?;

        // 2. Authorize
        if !self.permissions.has(L::WRITE_PERMISSION) {
            return Err(ListError::Forbidden(L::WRITE_PERMISSION.to_string()));
        }

        // 3. Send
        let result = match &cmd {
            SaveEntityCommand::Create(draft) => {
                self.resource.create(draft).await.map(Mutation::Created)
            }
            SaveEntityCommand::Update { id, draft } => {
                self.resource.update(id, draft).await.map(Mutation::Updated)
            }
        };

        let mutation = match result {
            Ok(mutation) => mutation,
            Err(error) => {
                debug!(feature = L::NAME, code = %error.code(), "Save failed: {}", error);
                self.notifier.notify(L::NAME, &error);
                return Err(error);
            }
        };

        // 4. Reflect in list and cache
        self.controller
            .after_mutation_success(mutation.clone())
            .await;

        Ok(mutation)
    }
}
