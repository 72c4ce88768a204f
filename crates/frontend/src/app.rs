use crate::auth::{AuthProvider, WithAuth};
use crate::components::NavBar;
use crate::pages::{
    CalendarPage, CreateTaskPage, DashboardPage, HomePage, LoginHistoryPage, LoginPage,
    NotFoundPage, PlayHistoryPage, RegisterPage, StampPage, TasksPage, UsersPage,
};
use crate::routes::Route;
use crate::theme::PreferencesProvider;
use yew::prelude::*;
use yew_router::prelude::*;

fn switch(route: Route) -> Html {
    match route {
        Route::Root => html! { <Redirect<Route> to={Route::Home} /> },
        Route::Login => html! { <LoginPage /> },
        Route::Register => html! { <RegisterPage /> },
        Route::Stamp => html! { <WithAuth<StampPage> skip_reconcile=true /> },
        Route::Home => html! { <WithAuth<HomePage> /> },
        Route::Tasks => html! { <WithAuth<TasksPage> /> },
        Route::CreateTask => html! { <WithAuth<CreateTaskPage> /> },
        Route::Dashboard => html! { <WithAuth<DashboardPage> /> },
        Route::Calendar => html! { <WithAuth<CalendarPage> /> },
        Route::LoginHistory => html! { <WithAuth<LoginHistoryPage> /> },
        Route::PlayHistory => html! { <WithAuth<PlayHistoryPage> /> },
        Route::Users => html! { <WithAuth<UsersPage> admin_only=true /> },
        Route::NotFound => html! { <NotFoundPage /> },
    }
}

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <BrowserRouter>
            <PreferencesProvider>
                <AuthProvider>
                    <div class="min-h-screen bg-gray-50 dark:bg-gray-900 text-gray-900 dark:text-gray-100">
                        <NavBar />
                        <main>
                            <Switch<Route> render={switch} />
                        </main>
                    </div>
                </AuthProvider>
            </PreferencesProvider>
        </BrowserRouter>
    }
}
