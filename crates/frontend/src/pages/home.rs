use crate::auth::PageProps;
use yew::prelude::*;

#[function_component(HomePage)]
pub fn home_page(props: &PageProps) -> Html {
    html! {
        <div class="min-h-[60vh] flex items-center justify-center">
            <div class="max-w-md w-full bg-white dark:bg-gray-800 shadow rounded-lg p-6 text-center">
                <h2 class="text-2xl font-semibold text-gray-900 dark:text-white">
                    {format!("Welcome, {}", props.user.greeting_name())}
                </h2>
                if props.user.is_admin {
                    <p class="mt-2 text-sm text-gray-500">{"Signed in as administrator"}</p>
                }
            </div>
        </div>
    }
}
