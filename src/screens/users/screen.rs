use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use crate::api::dto::{CreateUserRequest, UpdateUserRequest};
use crate::api::ApiError;
use crate::config::ScreenConfig;
use crate::mapper::{role_from_dto, user_from_dto};
use crate::model::{default_roles, Role, User};
use crate::repository::{RoleRepository, UserRepository};
use crate::screens::users::intent::UsersIntent;
use crate::screens::users::reducer::UsersReducer;
use crate::screens::users::state::{UserStatusFilter, UsersState};
use crate::state::{Debouncer, InFlight, Store, Submission, TaskScope};
use crate::validation::{
    has_changes, validate_edit_user, validate_new_user, EditUserForm, NewUserForm,
};

/// User administration: list, filter, create, edit, (de)activate, delete.
pub struct UsersScreen {
    scope: TaskScope,
    debouncer: Debouncer<String>,
    inner: Arc<Inner>,
}

struct Inner {
    store: Store<UsersReducer>,
    users: Arc<dyn UserRepository>,
    roles: Arc<dyn RoleRepository>,
    in_flight: Arc<InFlight>,
}

impl UsersScreen {
    pub fn new(
        users: Arc<dyn UserRepository>,
        roles: Arc<dyn RoleRepository>,
        config: &ScreenConfig,
    ) -> Self {
        let store = Store::new(UsersState::default());
        let dispatcher = store.dispatcher();
        let debouncer = Debouncer::new(
            Duration::from_millis(config.search_debounce_ms),
            move |query| dispatcher.dispatch(UsersIntent::SearchCommitted(query)),
        );

        Self {
            scope: TaskScope::new(),
            debouncer,
            inner: Arc::new(Inner {
                store,
                users,
                roles,
                in_flight: InFlight::new(),
            }),
        }
    }

    pub fn state(&self) -> UsersState {
        self.inner.store.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<UsersState> {
        self.inner.store.subscribe()
    }

    pub async fn settle(&self) -> UsersState {
        self.inner.store.settle().await
    }

    pub async fn load(&self) -> UsersState {
        let inner = Arc::clone(&self.inner);
        match self.scope.run(async move { inner.load().await }).await {
            Some(state) => state,
            None => self.state(),
        }
    }

    pub fn retry(&self) {
        let inner = Arc::clone(&self.inner);
        self.scope.spawn(async move {
            inner.load().await;
        });
    }

    /// Fetches the role catalogue, falling back to the built-in one.
    pub async fn load_roles(&self) -> Vec<Role> {
        let inner = Arc::clone(&self.inner);
        match self.scope.run(async move { inner.load_roles().await }).await {
            Some(roles) => roles,
            None => self.available_roles(),
        }
    }

    pub fn available_roles(&self) -> Vec<Role> {
        let roles = self.state().roles;
        if roles.is_empty() {
            default_roles()
        } else {
            roles
        }
    }

    pub fn on_query_change(&self, query: &str) {
        self.inner
            .store
            .dispatch(UsersIntent::QueryTyped(query.to_string()));
        self.debouncer.push(query.to_string());
    }

    pub async fn flush_search(&self) {
        self.debouncer.flush().await;
    }

    /// Adds `role` to the filter, or removes it when already selected.
    pub fn toggle_role_filter(&self, role: &str) {
        self.inner
            .store
            .dispatch(UsersIntent::RoleToggled(role.to_string()));
    }

    pub fn set_status_filter(&self, status: UserStatusFilter) {
        self.inner
            .store
            .dispatch(UsersIntent::StatusFilterSelected(status));
    }

    pub fn clear_filters(&self) {
        self.debouncer.cancel();
        self.inner.store.dispatch(UsersIntent::FiltersCleared);
    }

    pub fn acknowledge(&self) {
        self.inner.store.dispatch(UsersIntent::OperationAcknowledged);
    }

    pub fn user_by_id(&self, id: i64) -> Option<User> {
        self.state().items.into_iter().find(|u| u.id == id)
    }

    /// Flips the active flag of `id` on the server, then locally.
    pub async fn toggle_active(&self, id: i64) -> Submission<bool> {
        let Some(user) = self.user_by_id(id) else {
            return Submission::Failed("Usuario no encontrado".to_string());
        };
        let Some(guard) = self.inner.in_flight.try_acquire(user_key(id)) else {
            return Submission::Busy;
        };

        let inner = Arc::clone(&self.inner);
        self.run(async move {
            let _guard = guard;
            inner.set_active(id, !user.active).await
        })
        .await
    }

    pub async fn delete_user(&self, id: i64) -> Submission<()> {
        let Some(guard) = self.inner.in_flight.try_acquire(user_key(id)) else {
            return Submission::Busy;
        };

        let inner = Arc::clone(&self.inner);
        self.run(async move {
            let _guard = guard;
            inner.delete(id).await
        })
        .await
    }

    /// Creates the account and reloads the list; the backend does not echo
    /// the new user.
    pub async fn create_user(&self, form: NewUserForm) -> Submission<()> {
        let errors = validate_new_user(&form, &self.state().items);
        if !errors.is_empty() {
            self.inner
                .store
                .apply(UsersIntent::ValidationFailed(errors))
                .await;
            return Submission::Invalid;
        }

        let username = form.username.trim().to_lowercase();
        let Some(guard) = self.inner.in_flight.try_acquire(format!("user:new:{}", username)) else {
            return Submission::Busy;
        };

        let request = CreateUserRequest {
            username,
            email: form.email.trim().to_lowercase(),
            password: form.password.expose().trim().to_string(),
            nombre: form.nombre.trim().to_string(),
            apellido: form.apellido.trim().to_string(),
            roles: form.roles.into_iter().collect(),
        };

        let inner = Arc::clone(&self.inner);
        self.run(async move {
            let _guard = guard;
            inner.create(request).await
        })
        .await
    }

    /// Sends only the fields that differ from the loaded user.
    pub async fn update_user(&self, id: i64, form: EditUserForm) -> Submission<User> {
        let snapshot = self.state();
        let Some(original) = snapshot.items.iter().find(|u| u.id == id).cloned() else {
            return Submission::Failed("Usuario no encontrado".to_string());
        };

        let errors = validate_edit_user(&form, id, &snapshot.items);
        if !errors.is_empty() {
            self.inner
                .store
                .apply(UsersIntent::ValidationFailed(errors))
                .await;
            return Submission::Invalid;
        }
        if !has_changes(&form, &original) {
            return Submission::Accepted(original);
        }

        let Some(guard) = self.inner.in_flight.try_acquire(user_key(id)) else {
            return Submission::Busy;
        };

        let inner = Arc::clone(&self.inner);
        self.run(async move {
            let _guard = guard;
            inner.update(original, form).await
        })
        .await
    }

    async fn run<T, F>(&self, future: F) -> Submission<T>
    where
        T: Send + 'static,
        F: std::future::Future<Output = Submission<T>> + Send + 'static,
    {
        self.scope
            .run(future)
            .await
            .unwrap_or_else(|| Submission::Failed(ApiError::Incomplete.user_message()))
    }
}

impl Inner {
    async fn load(&self) -> UsersState {
        self.store.dispatch(UsersIntent::LoadStarted);
        match self.users.fetch_all().await.into_result() {
            Ok(records) => {
                let users = records.iter().map(user_from_dto).collect();
                self.store.apply(UsersIntent::Loaded(users)).await
            }
            Err(err) => {
                self.store
                    .apply(UsersIntent::LoadFailed(err.user_message()))
                    .await
            }
        }
    }

    async fn load_roles(&self) -> Vec<Role> {
        let roles = match self.roles.fetch_all().await.into_result() {
            Ok(records) if !records.is_empty() => records.iter().map(role_from_dto).collect(),
            Ok(_) => default_roles(),
            Err(err) => {
                tracing::warn!(error = %err, "Using built-in role catalogue");
                default_roles()
            }
        };
        self.store.apply(UsersIntent::RolesLoaded(roles.clone())).await;
        roles
    }

    async fn set_active(&self, id: i64, active: bool) -> Submission<bool> {
        self.store.dispatch(UsersIntent::SubmissionStarted);
        let result = if active {
            self.users.activate(id).await
        } else {
            self.users.deactivate(id).await
        };
        match result.into_result() {
            Ok(()) => {
                self.store
                    .apply(UsersIntent::ActiveChanged { id, active })
                    .await;
                Submission::Accepted(active)
            }
            Err(err) => self.fail("Error al cambiar el estado", err).await,
        }
    }

    async fn delete(&self, id: i64) -> Submission<()> {
        self.store.dispatch(UsersIntent::SubmissionStarted);
        match self.users.delete(id).await.into_result() {
            Ok(()) => {
                self.store.apply(UsersIntent::Deleted { id }).await;
                Submission::Accepted(())
            }
            Err(err) => self.fail("Error al eliminar", err).await,
        }
    }

    async fn create(&self, request: CreateUserRequest) -> Submission<()> {
        self.store.dispatch(UsersIntent::SubmissionStarted);
        match self.users.create(&request).await.into_result() {
            Ok(()) => {
                self.store
                    .apply(UsersIntent::Succeeded(
                        "Usuario creado exitosamente".to_string(),
                    ))
                    .await;
                self.load().await;
                Submission::Accepted(())
            }
            Err(err) => self.fail("Error al crear usuario", err).await,
        }
    }

    async fn update(&self, original: User, form: EditUserForm) -> Submission<User> {
        self.store.dispatch(UsersIntent::SubmissionStarted);

        let edited = User {
            nombre: form.nombre.trim().to_string(),
            apellido: form.apellido.trim().to_string(),
            email: form.email.trim().to_string(),
            roles: form.roles,
            ..original.clone()
        };
        let request = UpdateUserRequest {
            email: changed(&original.email, &edited.email),
            nombre: changed(&original.nombre, &edited.nombre),
            apellido: changed(&original.apellido, &edited.apellido),
            roles: (edited.roles != original.roles)
                .then(|| edited.roles.iter().cloned().collect()),
        };

        match self.users.update(original.id, &request).await.into_result() {
            Ok(()) => {
                self.store.apply(UsersIntent::Updated(edited.clone())).await;
                Submission::Accepted(edited)
            }
            Err(err) => self.fail("Error al actualizar", err).await,
        }
    }

    async fn fail<T>(&self, prefix: &str, err: ApiError) -> Submission<T> {
        let message = format!("{}: {}", prefix, err.user_message());
        self.store
            .apply(UsersIntent::OperationFailed(message.clone()))
            .await;
        Submission::Failed(message)
    }
}

fn user_key(id: i64) -> String {
    format!("user:{}", id)
}

fn changed(before: &str, after: &str) -> Option<String> {
    (before != after).then(|| after.to_string())
}
