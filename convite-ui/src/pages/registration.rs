//! Registration Page
//!
//! Invite form for the event. A confirmed registration opens a dialog;
//! closing it clears the form. A failed one raises an alert and keeps the
//! fields as typed.

use leptos::*;

use convite::attendee::{BUSINESS_TYPES, NEIGHBORHOODS};
use convite::registration::{
    sanitize_contact, CONFIRMATION_MESSAGE, CONFIRMATION_TITLE, SUBMIT_FAILED_MESSAGE,
};
use convite::{FormAction, FormField, RegistrationForm, SubmitStatus, EVENT};

use crate::api;
use crate::state::global::GlobalState;

/// Registration page component
#[component]
pub fn Registration() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let form = create_rw_signal(RegistrationForm::new());

    let edit = move |field: FormField, value: String| {
        form.update(|f| *f = std::mem::take(f).apply(FormAction::Edit(field, value)));
    };

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();

        let mut next = form.get_untracked();
        let invite = match next.begin_submit() {
            Ok(Some(invite)) => invite,
            Ok(None) => return,
            Err(e) => {
                state.show_error(&e.to_string());
                return;
            }
        };
        form.set(next);

        spawn_local(async move {
            match api::create_invite(&invite).await {
                Ok(()) => form.update(|f| f.confirm()),
                Err(e) => {
                    web_sys::console::error_1(&format!("Failed to register: {}", e).into());
                    if let Some(window) = web_sys::window() {
                        let _ = window.alert_with_message(SUBMIT_FAILED_MESSAGE);
                    }
                    form.update(|f| f.fail(SUBMIT_FAILED_MESSAGE));
                }
            }
        });
    };

    let submitting = create_memo(move |_| form.with(|f| f.is_submitting()));
    let confirmed = create_memo(move |_| form.with(|f| f.status == SubmitStatus::Confirmed));

    view! {
        <div class="flex items-center justify-center p-4">
            <div class="w-full max-w-3xl bg-gray-800 rounded-xl border border-primary-500/20 p-6 sm:p-8">
                <EventHeader />

                <form on:submit=on_submit class="space-y-4">
                    <TextField
                        label="Nome Completo"
                        placeholder="Digite seu nome completo"
                        field=FormField::Name
                        form=form
                        on_edit=edit
                    />
                    <TextField
                        label="Localização"
                        placeholder="Bairro onde vive"
                        field=FormField::Location
                        form=form
                        on_edit=edit
                        suggestions="bairros"
                    />

                    <div>
                        <label class="block text-sm text-gray-400 mb-2">"Contacto"</label>
                        <input
                            type="tel"
                            inputmode="numeric"
                            required=true
                            maxlength="9"
                            placeholder="84 123 4567"
                            class="bg-gray-700 rounded-lg px-4 py-3 w-full border border-gray-600 focus:border-primary-500 focus:outline-none"
                            prop:value=move || form.with(|f| f.contact.clone())
                            on:input=move |ev| edit(FormField::Contact, sanitize_contact(&event_target_value(&ev)))
                        />
                    </div>

                    <TextField
                        label="Negócio (opcional)"
                        placeholder="Tipo de negócio"
                        field=FormField::Business
                        form=form
                        on_edit=edit
                        suggestions="negocios"
                        required=false
                    />

                    <datalist id="bairros">
                        {NEIGHBORHOODS.iter().map(|n| view! { <option value=*n /> }).collect_view()}
                    </datalist>
                    <datalist id="negocios">
                        {BUSINESS_TYPES.iter().map(|b| view! { <option value=*b /> }).collect_view()}
                    </datalist>

                    <button
                        type="submit"
                        disabled=move || submitting.get()
                        class="w-full py-3 bg-primary-600 hover:bg-primary-700 disabled:opacity-50 rounded-lg font-medium transition-colors"
                    >
                        {move || if submitting.get() { "A enviar..." } else { "Confirmar Participação" }}
                    </button>
                </form>
            </div>

            <Show when=move || confirmed.get()>
                <ConfirmationDialog on_close=move || form.update(|f| f.close_confirmation()) />
            </Show>
        </div>
    }
}

/// Event name, invitation and when/where
#[component]
fn EventHeader() -> impl IntoView {
    view! {
        <div class="text-center space-y-6 pb-8">
            <div class="space-y-2">
                <h1 class="text-3xl font-bold text-primary-400">{EVENT.name}</h1>
                <p class="text-xl font-semibold">{EVENT.tagline}</p>
            </div>

            <div class="max-w-2xl mx-auto space-y-6">
                <p class="text-sm leading-relaxed text-gray-400">{EVENT.about}</p>
                <div class="space-y-2">
                    <h2 class="text-xl font-semibold">{EVENT.invitation_title}</h2>
                    <p class="text-gray-400">{EVENT.invitation}</p>
                </div>
            </div>

            <div class="flex justify-center gap-6 flex-wrap text-gray-400">
                <span>"📅 " {EVENT.date}</span>
                <span>"🕘 " {EVENT.hours}</span>
                <span>"📍 " {EVENT.venue}</span>
            </div>
        </div>
    }
}

/// Labelled text input bound to one form field
#[component]
fn TextField<F>(
    label: &'static str,
    placeholder: &'static str,
    field: FormField,
    form: RwSignal<RegistrationForm>,
    on_edit: F,
    #[prop(optional)]
    suggestions: Option<&'static str>,
    #[prop(default = true)]
    required: bool,
) -> impl IntoView
where
    F: Fn(FormField, String) + Copy + 'static,
{
    view! {
        <div>
            <label class="block text-sm text-gray-400 mb-2">{label}</label>
            <input
                type="text"
                required=required
                placeholder=placeholder
                list=suggestions
                class="bg-gray-700 rounded-lg px-4 py-3 w-full border border-gray-600 focus:border-primary-500 focus:outline-none"
                prop:value=move || form.with(|f| f.value(field).to_string())
                on:input=move |ev| on_edit(field, event_target_value(&ev))
            />
        </div>
    }
}

#[component]
fn ConfirmationDialog<F>(on_close: F) -> impl IntoView
where
    F: Fn() + Copy + 'static,
{
    view! {
        <div class="fixed inset-0 z-40 flex items-center justify-center bg-black/60">
            <div class="bg-gray-800 rounded-xl p-6 max-w-md w-full mx-4 text-center space-y-4">
                <h2 class="text-xl font-bold">{CONFIRMATION_TITLE}</h2>
                <p class="text-gray-400">{CONFIRMATION_MESSAGE}</p>
                <p class="font-semibold">{EVENT.farewell()}</p>
                <button
                    on:click=move |_| on_close()
                    class="w-full py-3 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors"
                >
                    "Fechar"
                </button>
            </div>
        </div>
    }
}
