//! Loading placeholder shown while auth or data is pending

use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct SpinnerProps {
    #[prop_or_default]
    pub text: Option<AttrValue>,
    /// Centre in the viewport instead of the enclosing block
    #[prop_or_default]
    pub full_page: bool,
}

#[function_component(LoadingSpinner)]
pub fn loading_spinner(props: &SpinnerProps) -> Html {
    let container = if props.full_page {
        "flex flex-col items-center justify-center min-h-screen"
    } else {
        "flex flex-col items-center p-10"
    };
    html! {
        <div class={container} role="status" aria-live="polite">
            <div class="w-10 h-10 border-4 border-gray-200 dark:border-gray-700 border-t-blue-500 rounded-full animate-spin mb-4"></div>
            if let Some(text) = &props.text {
                <p class="text-gray-600 dark:text-gray-400 text-sm">{text.clone()}</p>
            }
        </div>
    }
}
