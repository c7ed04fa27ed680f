//! transport::operation
//!
//! The catalogue of coordinator operations.
//!
//! Each operation knows both of its addresses: the subject triple used by
//! the messaging transport and the REST route used by the HTTP transport.
//! Commands name an [`Operation`]; they never build subjects or URLs.

use std::fmt;

use super::subject::Category;

/// HTTP method of a REST route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    /// Whether the payload travels as query parameters rather than a body.
    pub fn uses_query(&self) -> bool {
        matches!(self, Method::Get | Method::Delete)
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// REST route relative to `/api/projects/<project>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub method: Method,
    /// Path segments, unescaped
    pub segments: Vec<String>,
}

impl Route {
    fn new(method: Method, segments: &[&str]) -> Self {
        Self {
            method,
            segments: segments.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// A request the coordinator understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    SubmitWork,
    WorkStatus(String),
    ListWork,
    GetWork(String),
    CancelWork(String),

    ListAgents,
    AgentDetails(String),
    ShutdownAgent(String),

    ListTargets,
    RegisterTarget,
    GetTarget(String),
    UpdateTarget(String),
    RemoveTarget(String),
    TestTarget(String),
    EnableTarget(String),
    DisableTarget(String),

    TriggerSpinup,
    SpinupStatus(String),
    ListSpinups,

    Stats,
}

impl Operation {
    pub fn category(&self) -> Category {
        use Operation::*;
        match self {
            SubmitWork | WorkStatus(_) | ListWork | GetWork(_) | CancelWork(_) => Category::Work,
            ListAgents | AgentDetails(_) | ShutdownAgent(_) => Category::Agents,
            ListTargets | RegisterTarget | GetTarget(_) | UpdateTarget(_) | RemoveTarget(_)
            | TestTarget(_) | EnableTarget(_) | DisableTarget(_) => Category::Targets,
            TriggerSpinup | SpinupStatus(_) | ListSpinups => Category::Spinup,
            Stats => Category::Stats,
        }
    }

    /// The operation token of the subject.
    pub fn verb(&self) -> &'static str {
        use Operation::*;
        match self {
            SubmitWork => "submit",
            WorkStatus(_) | SpinupStatus(_) => "status",
            ListWork | ListAgents | ListTargets | ListSpinups => "list",
            GetWork(_) | GetTarget(_) | Stats => "get",
            CancelWork(_) => "cancel",
            AgentDetails(_) => "details",
            ShutdownAgent(_) => "shutdown",
            RegisterTarget => "register",
            UpdateTarget(_) => "update",
            RemoveTarget(_) => "remove",
            TestTarget(_) => "test",
            EnableTarget(_) => "enable",
            DisableTarget(_) => "disable",
            TriggerSpinup => "trigger",
        }
    }

    /// The entity this operation is scoped to, if any.
    pub fn entity_id(&self) -> Option<&str> {
        use Operation::*;
        match self {
            WorkStatus(id) | GetWork(id) | CancelWork(id) | AgentDetails(id)
            | ShutdownAgent(id) | GetTarget(id) | UpdateTarget(id) | RemoveTarget(id)
            | TestTarget(id) | EnableTarget(id) | DisableTarget(id) | SpinupStatus(id) => {
                Some(id)
            }
            SubmitWork | ListWork | ListAgents | ListTargets | RegisterTarget
            | TriggerSpinup | ListSpinups | Stats => None,
        }
    }

    /// The REST route of this operation.
    pub fn route(&self) -> Route {
        use Method::*;
        use Operation::*;
        match self {
            SubmitWork => Route::new(Post, &["work"]),
            WorkStatus(id) => Route::new(Get, &["work", id, "status"]),
            ListWork => Route::new(Get, &["work"]),
            GetWork(id) => Route::new(Get, &["work", id]),
            CancelWork(id) => Route::new(Post, &["work", id, "cancel"]),

            ListAgents => Route::new(Get, &["agents"]),
            AgentDetails(id) => Route::new(Get, &["agents", id]),
            ShutdownAgent(id) => Route::new(Post, &["agents", id, "shutdown"]),

            ListTargets => Route::new(Get, &["targets"]),
            RegisterTarget => Route::new(Post, &["targets"]),
            GetTarget(id) => Route::new(Get, &["targets", id]),
            UpdateTarget(id) => Route::new(Patch, &["targets", id]),
            RemoveTarget(id) => Route::new(Delete, &["targets", id]),
            TestTarget(id) => Route::new(Post, &["targets", id, "test"]),
            EnableTarget(id) => Route::new(Post, &["targets", id, "enable"]),
            DisableTarget(id) => Route::new(Post, &["targets", id, "disable"]),

            TriggerSpinup => Route::new(Post, &["spin-up"]),
            SpinupStatus(id) => Route::new(Get, &["spin-up", id]),
            ListSpinups => Route::new(Get, &["spin-up"]),

            Stats => Route::new(Get, &["stats"]),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.category(), self.verb())?;
        if let Some(id) = self.entity_id() {
            write!(f, " {}", id)?;
        }
        Ok(())
    }
}
