use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Screen {
    Dashboard,
    Projects,
    ContentPlanning,
    Content,
    Reports,
    AiOverview,
    SmartLinks,
    InternalLinks,
    SeoAudits,
    Crm,
    SocialMedia,
    Settings,
}

/// View mode within a screen. `Edit` carries its target id, so an edit route
/// without a record to edit cannot be expressed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "view", content = "id")]
pub enum View {
    Main,
    List,
    SelectType,
    ManualForm,
    IntelligentForm,
    Results,
    Queries,
    History,
    SelectProject,
    New,
    Edit(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub screen: Screen,
    #[serde(flatten)]
    pub view: View,
}

impl Route {
    pub fn new(screen: Screen, view: View) -> Self {
        Self { screen, view }
    }

    pub fn list(screen: Screen) -> Self {
        Self::new(screen, View::List)
    }
}

impl Default for Route {
    fn default() -> Self {
        Self::new(Screen::Dashboard, View::Main)
    }
}

/// Current screen/view/target triple, replaced wholesale on every navigation.
/// No history stack, no URL mapping; it lives for the duration of an
/// authenticated session.
#[derive(Clone)]
pub struct Router {
    route: Arc<watch::Sender<Route>>,
}

impl Router {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(Route::default());
        Self {
            route: Arc::new(sender),
        }
    }

    pub fn navigate(&self, route: Route) {
        tracing::debug!(?route, "navigate");
        self.route.send_replace(route);
    }

    /// Back to the initial route. Runs when the session ends.
    pub fn reset(&self) {
        self.route.send_replace(Route::default());
    }

    pub fn current(&self) -> Route {
        self.route.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Route> {
        self.route.subscribe()
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}
