//! Statistics Card Component

use leptos::*;

/// One summary figure with a title, a caption and an optional footer line
#[component]
pub fn StatCard(
    title: &'static str,
    description: &'static str,
    /// Gradient classes for the card background
    accent: &'static str,
    #[prop(into)]
    value: Signal<String>,
    #[prop(optional, into)]
    footer: Option<Signal<String>>,
    /// Progress bar fill, 0 to 100; values above 100 render full
    #[prop(optional, into)]
    progress: Option<Signal<f64>>,
) -> impl IntoView {
    view! {
        <div class=format!("rounded-lg p-2 sm:p-4 overflow-hidden border border-gray-700 {}", accent)>
            <div class="text-sm sm:text-lg font-medium truncate">{title}</div>
            <div class="text-xs sm:text-sm text-gray-400 truncate">{description}</div>

            <div class="text-xl sm:text-3xl font-bold mt-2 truncate">{move || value.get()}</div>

            {progress.map(|progress| view! {
                <div class="h-2 mt-2 rounded bg-gray-700">
                    <div
                        class="h-2 rounded bg-primary-500"
                        style=move || format!("width: {:.1}%", progress.get().clamp(0.0, 100.0))
                    />
                </div>
            })}

            {footer.map(|footer| view! {
                <div class="text-xs text-gray-400 mt-1 truncate">{move || footer.get()}</div>
            })}
        </div>
    }
}
