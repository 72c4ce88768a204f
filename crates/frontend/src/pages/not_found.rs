use crate::routes::Route;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(NotFoundPage)]
pub fn not_found_page() -> Html {
    html! {
        <div class="min-h-[60vh] flex flex-col items-center justify-center">
            <h1 class="text-4xl font-bold text-gray-900 dark:text-white">{"404"}</h1>
            <p class="mt-2 text-gray-600 dark:text-gray-400">{"Page not found"}</p>
            <Link<Route> to={Route::Home} classes="mt-4 text-blue-600">{"Back home"}</Link<Route>>
        </div>
    }
}
