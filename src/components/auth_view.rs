//! Auth View Component
//!
//! Sign-in / create-account card with the business-profile fields shown in
//! sign-up mode. Mode, loading flag and error text live in the UI store;
//! the field values are component-local.

use leptos::prelude::*;
use leptos::task::spawn_local;
use std::sync::Arc;

use boothrent_backend::auth::{AuthGateway, Credentials, SignUpRequest};
use boothrent_backend::domain::BusinessProfileInput;

use crate::context::use_app_context;
use crate::store::{AuthViewMode, UiStatePatch};

#[component]
pub fn AuthView() -> impl IntoView {
    let ctx = use_app_context();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (business_name, set_business_name) = signal(String::new());
    let (biz_phone, set_biz_phone) = signal(String::new());
    let (address1, set_address1) = signal(String::new());
    let (city, set_city) = signal(String::new());
    let (region, set_region) = signal(String::new());
    let (zip, set_zip) = signal(String::new());

    let is_sign_up = {
        let ctx = ctx.clone();
        move || ctx.watch().auth_view_mode == AuthViewMode::SignUp
    };
    let auth_error = {
        let ctx = ctx.clone();
        move || ctx.watch().auth_error
    };
    let auth_loading = {
        let ctx = ctx.clone();
        move || ctx.watch().auth_loading
    };

    let set_mode = {
        let ctx = ctx.clone();
        move |mode: AuthViewMode| {
            ctx.store.set_state(UiStatePatch {
                auth_view_mode: Some(mode),
                auth_error: Some(String::new()),
                ..UiStatePatch::default()
            });
        }
    };

    let on_submit = {
        let ctx = ctx.clone();
        move |ev: web_sys::SubmitEvent| {
            ev.prevent_default();
            let mode = ctx.store.state().auth_view_mode;
            let email = email.get().trim().to_string();
            let password = password.get();
            let profile = BusinessProfileInput {
                business_name: business_name.get().trim().to_string(),
                phone: biz_phone.get().trim().to_string(),
                address1: address1.get().trim().to_string(),
                city: city.get().trim().to_string(),
                state: region.get().trim().to_string(),
                zip: zip.get().trim().to_string(),
            };

            if mode == AuthViewMode::SignUp && profile.business_name.is_empty() {
                ctx.store.set_state(UiStatePatch {
                    auth_error: Some(
                        "Business Name is required to create your account.".to_string(),
                    ),
                    ..UiStatePatch::default()
                });
                return;
            }

            ctx.store.set_state(UiStatePatch {
                auth_loading: Some(true),
                auth_error: Some(String::new()),
                ..UiStatePatch::default()
            });

            let auth = Arc::clone(&ctx.auth);
            let store = Arc::clone(&ctx.store);
            spawn_local(async move {
                let result = match mode {
                    AuthViewMode::SignUp => auth
                        .sign_up(SignUpRequest {
                            email,
                            password,
                            business_profile: profile,
                        })
                        .await
                        .map(|_| ()),
                    AuthViewMode::SignIn => auth
                        .sign_in(Credentials { email, password })
                        .await
                        .map(|_| ()),
                };
                // Success lands through the session watcher; only failures
                // are reported here.
                if let Err(err) = result {
                    store.set_state(UiStatePatch {
                        auth_error: Some(err.user_message().to_string()),
                        auth_loading: Some(false),
                        ..UiStatePatch::default()
                    });
                }
            });
        }
    };

    view! {
        <div class="auth-card">
            <h1 class="auth-title">"Welcome to BoothRent Pro"</h1>

            <div class="auth-tabs" role="tablist" aria-label="Authentication mode">
                <button
                    type="button"
                    class="auth-tab"
                    class:active={
                        let signed_up = is_sign_up.clone();
                        move || !signed_up()
                    }
                    on:click={
                        let set_mode = set_mode.clone();
                        move |_| set_mode(AuthViewMode::SignIn)
                    }
                >
                    "Sign In"
                </button>
                <button
                    type="button"
                    class="auth-tab"
                    class:active=is_sign_up.clone()
                    on:click={
                        let set_mode = set_mode.clone();
                        move |_| set_mode(AuthViewMode::SignUp)
                    }
                >
                    "Create Account"
                </button>
            </div>

            <p
                class="auth-error"
                class:hidden={
                    let error = auth_error.clone();
                    move || error().is_empty()
                }
            >
                {auth_error.clone()}
            </p>

            <form class="form-grid" on:submit=on_submit>
                <label>
                    "Email"
                    <input
                        class="form-input"
                        type="email"
                        required=true
                        prop:value=move || email.get()
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                    />
                </label>

                <label>
                    "Password"
                    <input
                        class="form-input"
                        type="password"
                        required=true
                        minlength="6"
                        prop:value=move || password.get()
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                    />
                </label>

                <Show when=is_sign_up.clone()>
                    <div class="signup-fields">
                        <div class="form-grid">
                            <label>
                                "Business Name"
                                <input
                                    class="form-input"
                                    type="text"
                                    required=true
                                    prop:value=move || business_name.get()
                                    on:input=move |ev| set_business_name.set(event_target_value(&ev))
                                />
                            </label>
                            <label>
                                "Phone"
                                <input
                                    class="form-input"
                                    type="tel"
                                    prop:value=move || biz_phone.get()
                                    on:input=move |ev| set_biz_phone.set(event_target_value(&ev))
                                />
                            </label>
                            <label>
                                "Address 1"
                                <input
                                    class="form-input"
                                    type="text"
                                    prop:value=move || address1.get()
                                    on:input=move |ev| set_address1.set(event_target_value(&ev))
                                />
                            </label>
                            <label>
                                "City"
                                <input
                                    class="form-input"
                                    type="text"
                                    prop:value=move || city.get()
                                    on:input=move |ev| set_city.set(event_target_value(&ev))
                                />
                            </label>
                            <label>
                                "State"
                                <input
                                    class="form-input"
                                    type="text"
                                    prop:value=move || region.get()
                                    on:input=move |ev| set_region.set(event_target_value(&ev))
                                />
                            </label>
                            <label>
                                "Zip"
                                <input
                                    class="form-input"
                                    type="text"
                                    prop:value=move || zip.get()
                                    on:input=move |ev| set_zip.set(event_target_value(&ev))
                                />
                            </label>
                        </div>
                    </div>
                </Show>

                <button
                    class="btn btn-primary"
                    type="submit"
                    disabled=auth_loading.clone()
                >
                    {
                        let loading = auth_loading.clone();
                        let signed_up = is_sign_up.clone();
                        move || {
                            if loading() {
                                "Please wait..."
                            } else if signed_up() {
                                "Create Account"
                            } else {
                                "Sign In"
                            }
                        }
                    }
                </button>

                <button
                    type="button"
                    class="auth-switch"
                    on:click={
                        let ctx = ctx.clone();
                        let set_mode = set_mode.clone();
                        move |_| {
                            let next = match ctx.store.state().auth_view_mode {
                                AuthViewMode::SignUp => AuthViewMode::SignIn,
                                AuthViewMode::SignIn => AuthViewMode::SignUp,
                            };
                            set_mode(next);
                        }
                    }
                >
                    {
                        let signed_up = is_sign_up.clone();
                        move || {
                            if signed_up() {
                                "Already have an account? Sign In"
                            } else {
                                "Need an account? Create Account"
                            }
                        }
                    }
                </button>
            </form>
        </div>
    }
}
