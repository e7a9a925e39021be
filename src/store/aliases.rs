//! Per-entity store aliases
//!
//! Every CRUD resource gets a named store so application code reads as
//! "a `UserStore`", not "an `EntityStore<UsersApi>`".

use crate::api::{ClassesApi, DepartmentsApi, SemestersApi, SubjectsApi, UsersApi};
use crate::http::ApiClient;
use crate::store::EntityStore;
use std::sync::Arc;

pub type UserStore = EntityStore<UsersApi>;
pub type DepartmentStore = EntityStore<DepartmentsApi>;
pub type ClassStore = EntityStore<ClassesApi>;
pub type SubjectStore = EntityStore<SubjectsApi>;
pub type SemesterStore = EntityStore<SemestersApi>;

impl UserStore {
    pub fn for_client(client: Arc<ApiClient>) -> Self {
        Self::new(UsersApi::new(client))
    }
}

impl DepartmentStore {
    pub fn for_client(client: Arc<ApiClient>) -> Self {
        Self::new(DepartmentsApi::new(client))
    }
}

impl ClassStore {
    pub fn for_client(client: Arc<ApiClient>) -> Self {
        Self::new(ClassesApi::new(client))
    }
}

impl SubjectStore {
    pub fn for_client(client: Arc<ApiClient>) -> Self {
        Self::new(SubjectsApi::new(client))
    }
}

impl SemesterStore {
    pub fn for_client(client: Arc<ApiClient>) -> Self {
        Self::new(SemestersApi::new(client))
    }
}
