use crate::api::ApiErrorKind;
use crate::catatan::{
    delete_catatan, submit_catatan_update, submit_new_catatan, SubmitError, SubmitPhase,
};
use crate::components::hooks::{use_dynamic_options, use_pagination, UseDynamicOptions};
use crate::components::ui::{
    Alert, AlertDescription, Button, ButtonSize, ButtonVariant, Card, CardContent, CardDescription,
    CardHeader, CardTitle, Checkbox, Input, Label, Separator, Spinner, Textarea,
};
use crate::drafts::{load_draft, DraftSnapshot};
use crate::filter::visible_catatans;
use crate::form::{snapshot_from_catatan, CatatanFormState};
use crate::markdown::{parse_blocks, Block, Inline};
use crate::models::{Catatan, CountedOption};
use crate::state::{AppContext, AppState, Toast, ToastKind};
use crate::util::format_date_ymd;
use icons::{Check, X};
use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dom::helpers::window_event_listener;
use leptos_router::hooks::{use_navigate, use_params_map};
use wasm_bindgen::JsCast;

const PAGE_SIZE: usize = 9;

fn warn(msg: &str) {
    web_sys::console::warn_1(&msg.into());
}

/// Drop the session and bounce to the login page. Used whenever the
/// backend answers 401 mid-session.
fn force_logout(app_state: AppState) {
    let mut api_client = app_state.api_client.get_untracked();
    api_client.logout(&app_state.store);
    app_state.api_client.set(api_client);
    app_state.current_user.set(None);
    let _ = window().location().set_href("/login");
}

/// Reload the full catatan list. Guarded by a request id so a slow
/// response from a superseded load never overwrites a newer one.
fn load_catatans(app_state: AppState) {
    let api_client = app_state.api_client.get_untracked();
    let Ok(user_id) = api_client.require_user_id() else {
        return;
    };

    let request_id = app_state.catatans_request_id.get_untracked() + 1;
    app_state.catatans_request_id.set(request_id);
    app_state.catatans_loading.set(true);
    app_state.catatans_error.set(None);

    spawn_local(async move {
        let result = api_client.fetch_catatans(&user_id).await;

        // Stale response: a newer load started after this one.
        if app_state.catatans_request_id.get_untracked() != request_id {
            return;
        }

        match result {
            Ok(rows) => app_state.catatans.set(rows),
            Err(e) => {
                if e.kind == ApiErrorKind::Unauthorized {
                    force_logout(app_state);
                    return;
                }
                app_state.catatans_error.set(Some(e.message));
            }
        }
        app_state.catatans_loading.set(false);
    });
}

/// Reload the sidebar option lists with per-option note counts.
fn load_sidebar_counts(app_state: AppState) {
    let api_client = app_state.api_client.get_untracked();
    let Ok(user_id) = api_client.require_user_id() else {
        return;
    };

    spawn_local(async move {
        match api_client.fetch_kategoris(&user_id).await {
            Ok(rows) => {
                let mut counted = Vec::with_capacity(rows.len());
                for row in rows {
                    let count = match api_client
                        .count_catatan_by_kategori(&row.id, &user_id)
                        .await
                    {
                        Ok(n) => n,
                        Err(e) => {
                            warn(&format!("count kategori {} failed: {e}", row.nama));
                            0
                        }
                    };
                    counted.push(CountedOption {
                        id: row.id,
                        name: row.nama,
                        count,
                    });
                }
                app_state.kategoris.set(counted);
            }
            Err(e) => warn(&format!("load kategoris failed: {e}")),
        }

        match api_client.fetch_folders(&user_id).await {
            Ok(rows) => {
                let mut counted = Vec::with_capacity(rows.len());
                for row in rows {
                    let count = match api_client.count_catatan_by_folder(&row.id, &user_id).await {
                        Ok(n) => n,
                        Err(e) => {
                            warn(&format!("count folder {} failed: {e}", row.nama));
                            0
                        }
                    };
                    counted.push(CountedOption {
                        id: row.id,
                        name: row.nama,
                        count,
                    });
                }
                app_state.folders.set(counted);
            }
            Err(e) => warn(&format!("load folders failed: {e}")),
        }
    });
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let email: RwSignal<String> = RwSignal::new(String::new());
    let password: RwSignal<String> = RwSignal::new(String::new());
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let loading: RwSignal<bool> = RwSignal::new(false);

    let app_state = expect_context::<AppContext>();

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let email_val = email.get();
        let password_val = password.get();
        let mut api_client = app_state.0.api_client.get_untracked();

        loading.set(true);
        error.set(None);

        spawn_local(async move {
            match api_client.login(&email_val, &password_val).await {
                Ok(response) => {
                    api_client.set_session(response.access_token, response.user.clone());
                    api_client.save_to_storage(&app_state.0.store);
                    app_state.0.api_client.set(api_client);
                    app_state.0.current_user.set(Some(response.user));
                    let _ = window().location().set_href("/");
                }
                Err(e) => {
                    error.set(Some(e.message));
                }
            }
            loading.set(false);
        });
    };

    view! {
        <div class="min-h-screen bg-background">
            <div class="mx-auto flex min-h-screen w-full max-w-sm flex-col justify-center px-4 py-10">
                <div class="mb-6 flex items-center justify-center">
                    <a href="/" class="text-sm font-medium text-foreground">"Catatan"</a>
                </div>

                <Card>
                    <CardHeader>
                        <CardTitle class="text-lg">"Masuk"</CardTitle>
                        <CardDescription class="text-xs">"Gunakan email dan password Anda."</CardDescription>
                    </CardHeader>

                    <CardContent>
                        <form class="flex flex-col gap-3" on:submit=on_submit>
                        <div class="flex flex-col gap-1.5">
                            <Label html_for="email" class="text-xs">"Email"</Label>
                            <Input
                                id="email"
                                r#type="email"
                                placeholder="anda@contoh.com"
                                bind_value=email
                                required=true
                                class="h-8 text-sm"
                            />
                        </div>

                        <div class="flex flex-col gap-1.5">
                            <Label html_for="password" class="text-xs">"Password"</Label>
                            <Input
                                id="password"
                                r#type="password"
                                placeholder="••••••••"
                                bind_value=password
                                required=true
                                class="h-8 text-sm"
                            />
                        </div>

                        <Show when=move || error.get().is_some() fallback=|| ().into_view()>
                            {move || {
                                error.get().map(|e| {
                                    view! {
                                        <Alert class="border-destructive/30">
                                            <AlertDescription class="text-destructive text-xs">
                                                {e}
                                            </AlertDescription>
                                        </Alert>
                                    }
                                })
                            }}
                        </Show>

                        <Button
                            class="w-full"
                            size=ButtonSize::Sm
                            attr:disabled=move || loading.get()
                        >
                            <span class="inline-flex items-center gap-2">
                                <Show when=move || loading.get() fallback=|| ().into_view()>
                                    <Spinner />
                                </Show>
                                {move || if loading.get() { "Masuk..." } else { "Masuk" }}
                            </span>
                        </Button>

                        <div class="pt-1 text-xs text-muted-foreground">
                            "Belum punya akun? "
                            <a class="text-primary underline underline-offset-4" href="/register">"Daftar"</a>
                        </div>
                    </form>
                    </CardContent>
                </Card>
            </div>
        </div>
    }
}

#[component]
pub fn RegistrationPage() -> impl IntoView {
    let full_name: RwSignal<String> = RwSignal::new(String::new());
    let email: RwSignal<String> = RwSignal::new(String::new());
    let password: RwSignal<String> = RwSignal::new(String::new());
    let confirm_password: RwSignal<String> = RwSignal::new(String::new());
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let loading: RwSignal<bool> = RwSignal::new(false);
    let success: RwSignal<bool> = RwSignal::new(false);

    let app_state = expect_context::<AppContext>();

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let full_name_val = full_name.get();
        let email_val = email.get();
        let password_val = password.get();
        let confirm_password_val = confirm_password.get();
        let api_client = app_state.0.api_client.get_untracked();

        if password_val != confirm_password_val {
            error.set(Some("Password tidak sama".to_string()));
            return;
        }

        if password_val.len() < 6 {
            error.set(Some("Password minimal 6 karakter".to_string()));
            return;
        }

        loading.set(true);
        error.set(None);

        spawn_local(async move {
            match api_client
                .signup(&email_val, &password_val, &full_name_val)
                .await
            {
                Ok(_response) => {
                    // Signup may return a token; keep the flow simple and ask
                    // the user to sign in.
                    success.set(true);
                }
                Err(e) => {
                    error.set(Some(e.message));
                }
            }
            loading.set(false);
        });
    };

    view! {
        <div class="min-h-screen bg-background">
            <div class="mx-auto flex min-h-screen w-full max-w-sm flex-col justify-center px-4 py-10">
                <div class="mb-6 flex items-center justify-center">
                    <a href="/" class="text-sm font-medium text-foreground">"Catatan"</a>
                </div>

                <Card>
                    <CardHeader>
                        <CardTitle class="text-lg">"Buat akun"</CardTitle>
                        <CardDescription class="text-xs">"Daftar untuk mulai mencatat."</CardDescription>
                    </CardHeader>
                    <CardContent>

                    <Show
                        when=move || !success.get()
                        fallback=move || view! {
                            <Alert>
                                <AlertDescription class="text-xs">
                                    "Akun berhasil dibuat. Silakan "
                                    <a class="text-primary underline underline-offset-4" href="/login">"masuk"</a>
                                    "."
                                </AlertDescription>
                            </Alert>
                        }
                    >
                        <form class="flex flex-col gap-3" on:submit=on_submit>
                            <div class="flex flex-col gap-1.5">
                                <Label html_for="full_name" class="text-xs">"Nama lengkap"</Label>
                                <Input
                                    id="full_name"
                                    r#type="text"
                                    placeholder="Nama Anda"
                                    bind_value=full_name
                                    required=true
                                    class="h-8 text-sm"
                                />
                            </div>

                            <div class="flex flex-col gap-1.5">
                                <Label html_for="email" class="text-xs">"Email"</Label>
                                <Input
                                    id="email"
                                    r#type="email"
                                    placeholder="anda@contoh.com"
                                    bind_value=email
                                    required=true
                                    class="h-8 text-sm"
                                />
                            </div>

                            <div class="flex flex-col gap-1.5">
                                <Label html_for="password" class="text-xs">"Password"</Label>
                                <Input
                                    id="password"
                                    r#type="password"
                                    placeholder="••••••••"
                                    bind_value=password
                                    required=true
                                    class="h-8 text-sm"
                                />
                            </div>

                            <div class="flex flex-col gap-1.5">
                                <Label html_for="confirm_password" class="text-xs">"Ulangi password"</Label>
                                <Input
                                    id="confirm_password"
                                    r#type="password"
                                    placeholder="••••••••"
                                    bind_value=confirm_password
                                    required=true
                                    class="h-8 text-sm"
                                />
                            </div>

                            <Show when=move || error.get().is_some() fallback=|| ().into_view()>
                                {move || {
                                    error.get().map(|e| {
                                        view! {
                                            <Alert class="border-destructive/30">
                                                <AlertDescription class="text-destructive text-xs">
                                                    {e}
                                                </AlertDescription>
                                            </Alert>
                                        }
                                    })
                                }}
                            </Show>

                            <Button
                                class="w-full"
                                size=ButtonSize::Sm
                                attr:disabled=move || loading.get()
                            >
                                <span class="inline-flex items-center gap-2">
                                    <Show when=move || loading.get() fallback=|| ().into_view()>
                                        <Spinner />
                                    </Show>
                                    {move || if loading.get() { "Mendaftar..." } else { "Daftar" }}
                                </span>
                            </Button>

                            <div class="pt-1 text-xs text-muted-foreground">
                                "Sudah punya akun? "
                                <a class="text-primary underline underline-offset-4" href="/login">"Masuk"</a>
                            </div>
                        </form>
                    </Show>
                    </CardContent>
                </Card>
            </div>
        </div>
    }
}

#[component]
pub fn RootAuthed(children: ChildrenFn) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let is_authenticated = move || app_state.0.api_client.get().is_authenticated();

    // Store children so the view macro sees an `Fn` (not an `FnOnce`).
    let children = StoredValue::new(children);

    view! {
        <Show when=is_authenticated fallback=move || view! { <LoginPage /> }>
            {move || children.with_value(|c| c())}
        </Show>
    }
}

#[component]
pub fn RootPage() -> impl IntoView {
    view! {
        <RootAuthed>
            <CatatanMainPage />
        </RootAuthed>
    }
}

#[component]
pub fn CatatanMainPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>().0;

    // Initial load: untracked reads only, so this runs once per mount.
    Effect::new(move |_| {
        if !app_state.api_client.get_untracked().is_authenticated() {
            return;
        }
        load_catatans(app_state);
        load_sidebar_counts(app_state);
    });

    let on_logout = move |_| {
        force_logout(app_state);
    };

    let on_saved = Callback::new(move |_: ()| {
        app_state.show_add_form.set(false);
        load_catatans(app_state);
        load_sidebar_counts(app_state);
    });

    let on_cancel = Callback::new(move |_: ()| {
        app_state.show_add_form.set(false);
    });

    let user_email = move || {
        app_state
            .current_user
            .get()
            .and_then(|u| u.email)
            .unwrap_or_default()
    };

    view! {
        <div class="min-h-screen bg-background">
            <header class="border-b">
                <div class="mx-auto flex max-w-5xl items-center justify-between px-4 py-3">
                    <a href="/" class="text-sm font-semibold">"Catatan"</a>
                    <div class="flex items-center gap-3">
                        <span class="text-xs text-muted-foreground">{user_email}</span>
                        <Button
                            variant=ButtonVariant::Ghost
                            size=ButtonSize::Sm
                            on:click=on_logout
                        >
                            "Keluar"
                        </Button>
                    </div>
                </div>
            </header>

            <ToastView />

            <div class="mx-auto grid max-w-5xl gap-6 px-4 py-6 md:grid-cols-[220px_1fr]">
                <CatatanSidebar />

                <main class="space-y-4">
                    <div class="flex items-center justify-between">
                        <h1 class="text-lg font-semibold">"Catatan Saya"</h1>
                        <Show
                            when=move || !app_state.show_add_form.get()
                            fallback=|| ().into_view()
                        >
                            <Button
                                size=ButtonSize::Sm
                                on:click=move |_| app_state.show_add_form.set(true)
                            >
                                "Catatan Baru"
                            </Button>
                        </Show>
                    </div>

                    <Show when=move || app_state.show_add_form.get() fallback=|| ().into_view()>
                        <FormCatatanAdd on_saved=on_saved on_cancel=on_cancel />
                    </Show>

                    <CatatanList />
                </main>
            </div>
        </div>
    }
}

#[component]
fn ToastView() -> impl IntoView {
    let app_state = expect_context::<AppContext>().0;

    view! {
        <Show when=move || app_state.toast.get().is_some() fallback=|| ().into_view()>
            {move || {
                app_state.toast.get().map(|toast| {
                    let tone = match toast.kind {
                        ToastKind::Success => "border-primary/30 text-foreground",
                        ToastKind::Error => "border-destructive/30 text-destructive",
                    };
                    view! {
                        <div class="fixed bottom-4 right-4 z-50">
                            <Alert class=format!("bg-background shadow-md pr-10 {tone}")>
                                <AlertDescription class="text-xs">{toast.message}</AlertDescription>
                                <Button
                                    variant=ButtonVariant::Ghost
                                    size=ButtonSize::Icon
                                    class="absolute right-1 top-1 h-6 w-6"
                                    attr:aria-label="Tutup"
                                    on:click=move |_| app_state.toast.set(None)
                                >
                                    <X class="size-3" />
                                </Button>
                            </Alert>
                        </div>
                    }
                })
            }}
        </Show>
    }
}

#[component]
fn CatatanSidebar() -> impl IntoView {
    let app_state = expect_context::<AppContext>().0;

    view! {
        <aside class="space-y-4 text-sm">
            {move || {
                let class = if app_state.filter.get().is_active() {
                    "w-full justify-start"
                } else {
                    "w-full justify-start bg-accent"
                };
                view! {
                    <Button
                        variant=ButtonVariant::Ghost
                        size=ButtonSize::Sm
                        class=class
                        on:click=move |_| app_state.filter.update(|f| f.select_kategori(None))
                    >
                        "Semua Catatan"
                    </Button>
                }
            }}

            <Separator />

            <div class="space-y-1">
                <div class="px-3 text-xs font-medium uppercase text-muted-foreground">"Kategori"</div>
                {move || {
                    let items = app_state.kategoris.get();
                    let selected = app_state.filter.get().selected_kategori;
                    if items.is_empty() {
                        return view! {
                            <div class="px-3 text-xs text-muted-foreground">"Belum ada kategori."</div>
                        }
                        .into_any();
                    }
                    items
                        .into_iter()
                        .map(|opt| {
                            let active = selected.as_deref() == Some(opt.id.as_str());
                            let class = if active {
                                "w-full justify-between bg-accent"
                            } else {
                                "w-full justify-between"
                            };
                            let id_for_click = opt.id.clone();
                            view! {
                                <Button
                                    variant=ButtonVariant::Ghost
                                    size=ButtonSize::Sm
                                    class=class
                                    on:click=move |_| {
                                        app_state
                                            .filter
                                            .update(|f| f.select_kategori(Some(id_for_click.clone())))
                                    }
                                >
                                    <span class="truncate">{opt.name}</span>
                                    <span class="text-xs text-muted-foreground">{opt.count}</span>
                                </Button>
                            }
                        })
                        .collect_view()
                        .into_any()
                }}
            </div>

            <div class="space-y-1">
                <div class="px-3 text-xs font-medium uppercase text-muted-foreground">"Folder"</div>
                {move || {
                    let items = app_state.folders.get();
                    let selected = app_state.filter.get().selected_folder;
                    if items.is_empty() {
                        return view! {
                            <div class="px-3 text-xs text-muted-foreground">"Belum ada folder."</div>
                        }
                        .into_any();
                    }
                    items
                        .into_iter()
                        .map(|opt| {
                            let active = selected.as_deref() == Some(opt.id.as_str());
                            let class = if active {
                                "w-full justify-between bg-accent"
                            } else {
                                "w-full justify-between"
                            };
                            let id_for_click = opt.id.clone();
                            view! {
                                <Button
                                    variant=ButtonVariant::Ghost
                                    size=ButtonSize::Sm
                                    class=class
                                    on:click=move |_| {
                                        app_state
                                            .filter
                                            .update(|f| f.select_folder(Some(id_for_click.clone())))
                                    }
                                >
                                    <span class="truncate">{opt.name}</span>
                                    <span class="text-xs text-muted-foreground">{opt.count}</span>
                                </Button>
                            }
                        })
                        .collect_view()
                        .into_any()
                }}
            </div>

            <Separator />

            <Label class="px-3 text-xs" html_for="show_archived">
                <Checkbox id="show_archived" bind_checked=app_state.show_archived />
                "Tampilkan arsip"
            </Label>
        </aside>
    }
}

/// Plain-text preview of a note body for the list cards.
fn preview_text(body: &str) -> String {
    let flat = body.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() > 140 {
        let cut: String = flat.chars().take(140).collect();
        format!("{cut}…")
    } else {
        flat
    }
}

#[component]
fn CatatanList() -> impl IntoView {
    let app_state = expect_context::<AppContext>().0;

    let visible = Signal::derive(move || {
        visible_catatans(
            &app_state.catatans.get(),
            &app_state.filter.get(),
            app_state.show_archived.get(),
        )
    });
    let pagination = use_pagination(visible, PAGE_SIZE);

    // Changing the filter criteria replaces the visible sequence, so the
    // window goes back to the first page.
    Effect::new(move |_| {
        app_state.filter.track();
        app_state.show_archived.track();
        pagination.reset();
    });

    let shown_info = move || {
        format!(
            "Menampilkan {} dari {} catatan",
            pagination.current_items.get().len(),
            pagination.total_items.get()
        )
    };

    view! {
        <div class="space-y-3">
            <Show when=move || app_state.catatans_loading.get() fallback=|| ().into_view()>
                <div class="flex items-center gap-2 text-sm text-muted-foreground">
                    <Spinner />
                    "Memuat catatan..."
                </div>
            </Show>

            <Show when=move || app_state.catatans_error.get().is_some() fallback=|| ().into_view()>
                {move || {
                    app_state.catatans_error.get().map(|e| {
                        view! {
                            <Alert class="border-destructive/30">
                                <AlertDescription class="text-destructive text-xs">{e}</AlertDescription>
                                <Button
                                    variant=ButtonVariant::Outline
                                    size=ButtonSize::Sm
                                    class="mt-2"
                                    on:click=move |_| load_catatans(app_state)
                                >
                                    "Coba lagi"
                                </Button>
                            </Alert>
                        }
                    })
                }}
            </Show>

            <Show
                when=move || {
                    !app_state.catatans_loading.get() && pagination.total_items.get() == 0
                        && app_state.catatans_error.get().is_none()
                }
                fallback=|| ().into_view()
            >
                <div class="rounded-lg border border-dashed p-8 text-center text-sm text-muted-foreground">
                    "Belum ada catatan."
                </div>
            </Show>

            <div class="grid gap-3 sm:grid-cols-2 lg:grid-cols-3">
                {move || {
                    pagination
                        .current_items
                        .get()
                        .into_iter()
                        .map(|catatan| view! { <CatatanCard catatan=catatan /> })
                        .collect_view()
                }}
            </div>

            <Show when={move || pagination.total_items.get() > 0} fallback=|| ().into_view()>
                <div class="flex flex-col items-center gap-2 pt-2">
                    <div class="text-xs text-muted-foreground">{shown_info}</div>
                    <Show when=move || pagination.has_more.get() fallback=|| ().into_view()>
                        <Button
                            variant=ButtonVariant::Outline
                            size=ButtonSize::Sm
                            on:click=move |_| pagination.load_more()
                        >
                            "Muat Lebih Banyak"
                        </Button>
                    </Show>
                </div>
            </Show>
        </div>
    }
}

#[component]
fn CatatanCard(catatan: Catatan) -> impl IntoView {
    let href = format!("/catatan/{}", catatan.id);
    let kategori_nama = catatan.kategori_catatan.as_ref().map(|k| k.nama.clone());
    let folder_nama = catatan.folder_catatan.as_ref().map(|f| f.nama.clone());
    let preview = catatan
        .isi_catatan
        .as_deref()
        .map(preview_text)
        .unwrap_or_default();
    let date = format_date_ymd(&catatan.created_at);

    view! {
        <a href=href class="block">
            <Card class="h-full gap-2 py-4 transition-colors hover:bg-accent/40">
                <CardHeader class="gap-1 px-4">
                    <div class="flex w-full items-start justify-between gap-2">
                        <CardTitle class="truncate text-sm">{catatan.judul_catatan.clone()}</CardTitle>
                        <div class="flex shrink-0 gap-1">
                            {catatan.pinned.then(|| view! {
                                <span class="rounded bg-primary/10 px-1.5 py-0.5 text-[10px] text-primary">
                                    "Disematkan"
                                </span>
                            })}
                            {catatan.is_archived.then(|| view! {
                                <span class="rounded bg-muted px-1.5 py-0.5 text-[10px] text-muted-foreground">
                                    "Arsip"
                                </span>
                            })}
                        </div>
                    </div>
                    <CardDescription class="text-[11px]">{date}</CardDescription>
                </CardHeader>
                <CardContent class="space-y-2 px-4">
                    {(!preview.is_empty()).then(|| view! {
                        <p class="line-clamp-3 text-xs text-muted-foreground">{preview.clone()}</p>
                    })}
                    <div class="flex flex-wrap gap-1">
                        {kategori_nama.map(|nama| view! {
                            <span class="rounded-full border px-2 py-0.5 text-[10px]">{nama}</span>
                        })}
                        {folder_nama.map(|nama| view! {
                            <span class="rounded-full border px-2 py-0.5 text-[10px]">{nama}</span>
                        })}
                    </div>
                </CardContent>
            </Card>
        </a>
    }
}

/// Shared field block for the add and edit forms: title, body, the two
/// option selects with inline "add new" inputs, and the flag checkboxes.
#[component]
fn CatatanFormFields(form: CatatanFormState, options: UseDynamicOptions) -> impl IntoView {
    let on_kategori_change = move |ev: web_sys::Event| {
        if let Some(target) = ev.target() {
            if let Some(select) = target.dyn_ref::<web_sys::HtmlSelectElement>() {
                form.kategori_nama.set(select.value());
            }
        }
    };
    let on_folder_change = move |ev: web_sys::Event| {
        if let Some(target) = ev.target() {
            if let Some(select) = target.dyn_ref::<web_sys::HtmlSelectElement>() {
                form.folder_nama.set(select.value());
            }
        }
    };

    // These buttons live inside the form element; prevent the default
    // submit action.
    let confirm_add_kategori = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        let name = options.new_kategori_name.get_untracked();
        if let Some(added) = options.add_kategori_locally(&name) {
            form.kategori_nama.set(added.name);
            form.mark_dirty();
        }
        options.new_kategori_name.set(String::new());
        options.show_add_kategori.set(false);
    };
    let confirm_add_folder = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        let name = options.new_folder_name.get_untracked();
        if let Some(added) = options.add_folder_locally(&name) {
            form.folder_nama.set(added.name);
            form.mark_dirty();
        }
        options.new_folder_name.set(String::new());
        options.show_add_folder.set(false);
    };

    let select_class = "border-input h-8 w-full rounded-md border bg-transparent px-2 text-sm outline-none focus-visible:border-ring focus-visible:ring-ring/50 focus-visible:ring-2";

    view! {
        <div class="flex flex-col gap-1.5">
            <Label html_for="judul_catatan" class="text-xs">"Judul"</Label>
            <Input
                id="judul_catatan"
                placeholder="Judul catatan"
                bind_value=form.judul_catatan
                class="h-8 text-sm"
            />
            {move || {
                form.errors.get().judul_catatan.map(|msg| {
                    view! { <p class="text-xs text-destructive">{msg}</p> }
                })
            }}
        </div>

        <div class="flex flex-col gap-1.5">
            <Label html_for="isi_catatan" class="text-xs">"Isi"</Label>
            <Textarea
                id="isi_catatan"
                placeholder="Tulis catatan di sini... (mendukung markdown sederhana)"
                bind_value=form.isi_catatan
                class="text-sm"
            />
        </div>

        <div class="grid gap-3 sm:grid-cols-2">
            <div class="flex flex-col gap-1.5">
                <Label html_for="kategori" class="text-xs">"Kategori"</Label>
                <div class="flex items-center gap-1.5">
                    <select
                        id="kategori"
                        class=select_class
                        prop:value=move || form.kategori_nama.get()
                        on:change=on_kategori_change
                    >
                        <option value="">"Tanpa kategori"</option>
                        {move || {
                            let selected = form.kategori_nama.get();
                            options
                                .kategoris
                                .get()
                                .into_iter()
                                .map(|opt| {
                                    let name = opt.name.clone();
                                    let is_selected = name == selected;
                                    view! {
                                        <option value=name.clone() selected=is_selected>
                                            {opt.name}
                                        </option>
                                    }
                                })
                                .collect_view()
                        }}
                    </select>
                    <Button
                        variant=ButtonVariant::Outline
                        size=ButtonSize::Icon
                        class="h-8 w-8"
                        attr:title="Kategori baru"
                        on:click=move |ev: web_sys::MouseEvent| {
                            ev.prevent_default();
                            options.show_add_kategori.update(|v| *v = !*v)
                        }
                    >
                        "+"
                    </Button>
                </div>
                <Show when=move || options.show_add_kategori.get() fallback=|| ().into_view()>
                    <div class="flex items-center gap-1.5">
                        <Input
                            placeholder="Nama kategori baru"
                            bind_value=options.new_kategori_name
                            class="h-8 text-sm"
                        />
                        <Button
                            variant=ButtonVariant::Outline
                            size=ButtonSize::Icon
                            class="h-8 w-8"
                            attr:title="Tambah kategori"
                            on:click=confirm_add_kategori
                        >
                            <Check class="size-3.5" />
                        </Button>
                    </div>
                </Show>
            </div>

            <div class="flex flex-col gap-1.5">
                <Label html_for="folder" class="text-xs">"Folder"</Label>
                <div class="flex items-center gap-1.5">
                    <select
                        id="folder"
                        class=select_class
                        prop:value=move || form.folder_nama.get()
                        on:change=on_folder_change
                    >
                        <option value="">"Tanpa folder"</option>
                        {move || {
                            let selected = form.folder_nama.get();
                            options
                                .folders
                                .get()
                                .into_iter()
                                .map(|opt| {
                                    let name = opt.name.clone();
                                    let is_selected = name == selected;
                                    view! {
                                        <option value=name.clone() selected=is_selected>
                                            {opt.name}
                                        </option>
                                    }
                                })
                                .collect_view()
                        }}
                    </select>
                    <Button
                        variant=ButtonVariant::Outline
                        size=ButtonSize::Icon
                        class="h-8 w-8"
                        attr:title="Folder baru"
                        on:click=move |ev: web_sys::MouseEvent| {
                            ev.prevent_default();
                            options.show_add_folder.update(|v| *v = !*v)
                        }
                    >
                        "+"
                    </Button>
                </div>
                <Show when=move || options.show_add_folder.get() fallback=|| ().into_view()>
                    <div class="flex items-center gap-1.5">
                        <Input
                            placeholder="Nama folder baru"
                            bind_value=options.new_folder_name
                            class="h-8 text-sm"
                        />
                        <Button
                            variant=ButtonVariant::Outline
                            size=ButtonSize::Icon
                            class="h-8 w-8"
                            attr:title="Tambah folder"
                            on:click=confirm_add_folder
                        >
                            <Check class="size-3.5" />
                        </Button>
                    </div>
                </Show>
            </div>
        </div>

        <div class="flex items-center gap-4">
            <Label class="text-xs" html_for="pinned">
                <Checkbox id="pinned" bind_checked=form.pinned />
                "Sematkan"
            </Label>
            <Label class="text-xs" html_for="is_archived">
                <Checkbox id="is_archived" bind_checked=form.is_archived />
                "Arsipkan"
            </Label>
        </div>
    }
}

fn submit_phase_label(phase: SubmitPhase) -> &'static str {
    match phase {
        SubmitPhase::Validating => "Memeriksa...",
        SubmitPhase::ResolvingOptions => "Menyiapkan kategori...",
        SubmitPhase::Persisting => "Menyimpan...",
        SubmitPhase::Refreshing => "Memuat ulang...",
        _ => "Simpan",
    }
}

#[component]
fn FormCatatanAdd(
    #[prop(into)] on_saved: Callback<()>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    let app_state = expect_context::<AppContext>().0;

    let form = CatatanFormState::new(DraftSnapshot::default());
    let options = use_dynamic_options(vec![], vec![]);
    options.load_initial(app_state.api_client.get_untracked());

    let phase: RwSignal<SubmitPhase> = RwSignal::new(SubmitPhase::Idle);
    let submit_error: RwSignal<Option<String>> = RwSignal::new(None);
    let busy = Signal::derive(move || phase.get().is_in_flight());
    let has_draft: RwSignal<bool> = RwSignal::new(load_draft(&app_state.store).is_some());

    // A draft left behind by a closed tab survives in the single slot;
    // flush the current input there when the page goes away mid-edit.
    let _pagehide = window_event_listener(ev::pagehide, move |_| {
        if form.is_dirty.get_untracked() {
            let _ = form.save_draft(&app_state.store);
        }
    });

    let on_save_draft = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        if form.save_draft(&app_state.store) {
            has_draft.set(true);
            app_state.toast.set(Some(Toast::success("Draf disimpan")));
        } else {
            app_state
                .toast
                .set(Some(Toast::error("Draf gagal disimpan")));
        }
    };

    let on_load_draft = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        if form.load_draft(&app_state.store) {
            app_state.toast.set(Some(Toast::success("Draf dimuat")));
        } else {
            has_draft.set(false);
        }
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        if !form.validate() {
            return;
        }
        submit_error.set(None);

        let api_client = app_state.api_client.get_untracked();
        let snapshot = form.snapshot();

        spawn_local(async move {
            let result =
                submit_new_catatan(&api_client, &app_state.store, &snapshot, |p| phase.set(p))
                    .await;
            match result {
                Ok(outcome) => {
                    // A failed refresh leaves the current option lists in place.
                    if let (Some(kategoris), Some(folders)) = (outcome.kategoris, outcome.folders)
                    {
                        options.apply_confirmed(kategoris, folders);
                    }
                    form.reset();
                    has_draft.set(false);
                    app_state
                        .toast
                        .set(Some(Toast::success("Catatan berhasil disimpan")));
                    on_saved.run(());
                }
                Err(SubmitError::Validation(errors)) => {
                    form.errors.set(errors);
                }
                Err(SubmitError::Authentication) => {
                    force_logout(app_state);
                }
                Err(e) => {
                    submit_error.set(Some(e.to_string()));
                }
            }
        });
    };

    view! {
        <Card>
            <CardHeader>
                <div class="flex w-full items-center justify-between">
                    <CardTitle class="text-base">"Catatan Baru"</CardTitle>
                    <Button
                        variant=ButtonVariant::Ghost
                        size=ButtonSize::Icon
                        class="h-7 w-7"
                        attr:aria-label="Tutup"
                        on:click=move |_| on_cancel.run(())
                    >
                        <X class="size-4" />
                    </Button>
                </div>
            </CardHeader>
            <CardContent>
                <form
                    class="flex flex-col gap-3"
                    on:submit=on_submit
                    on:input=move |_| form.mark_dirty()
                    on:change=move |_| form.mark_dirty()
                >
                    <CatatanFormFields form=form options=options />

                    <Show when=move || submit_error.get().is_some() fallback=|| ().into_view()>
                        {move || {
                            submit_error.get().map(|e| {
                                view! {
                                    <Alert class="border-destructive/30">
                                        <AlertDescription class="text-destructive text-xs">{e}</AlertDescription>
                                    </Alert>
                                }
                            })
                        }}
                    </Show>

                    <div class="flex items-center gap-2">
                        <Button size=ButtonSize::Sm attr:disabled=move || busy.get()>
                            <span class="inline-flex items-center gap-2">
                                <Show when=move || busy.get() fallback=|| ().into_view()>
                                    <Spinner />
                                </Show>
                                {move || submit_phase_label(phase.get())}
                            </span>
                        </Button>
                        <Button
                            variant=ButtonVariant::Outline
                            size=ButtonSize::Sm
                            attr:disabled=move || busy.get()
                            on:click=on_save_draft
                        >
                            "Simpan Draf"
                        </Button>
                        <Show when=move || has_draft.get() fallback=|| ().into_view()>
                            <Button
                                variant=ButtonVariant::Ghost
                                size=ButtonSize::Sm
                                attr:disabled=move || busy.get()
                                on:click=on_load_draft
                            >
                                "Muat Draf"
                            </Button>
                        </Show>
                    </div>
                </form>
            </CardContent>
        </Card>
    }
}

fn render_inline(inline: Inline) -> AnyView {
    match inline {
        Inline::Text(text) => view! { <span>{text}</span> }.into_any(),
        Inline::Bold(text) => view! { <strong>{text}</strong> }.into_any(),
        Inline::Italic(text) => view! { <em>{text}</em> }.into_any(),
        Inline::Code(text) => {
            view! { <code class="rounded bg-muted px-1 py-0.5 font-mono text-[0.85em]">{text}</code> }
                .into_any()
        }
    }
}

fn render_block(block: Block) -> AnyView {
    let inlines = |spans: Vec<Inline>| spans.into_iter().map(render_inline).collect_view();
    match block {
        Block::Heading(1, spans) => {
            view! { <h1 class="text-xl font-semibold">{inlines(spans)}</h1> }.into_any()
        }
        Block::Heading(2, spans) => {
            view! { <h2 class="text-lg font-semibold">{inlines(spans)}</h2> }.into_any()
        }
        Block::Heading(3, spans) => {
            view! { <h3 class="text-base font-semibold">{inlines(spans)}</h3> }.into_any()
        }
        Block::Heading(_, spans) => {
            view! { <h4 class="text-sm font-semibold">{inlines(spans)}</h4> }.into_any()
        }
        Block::Quote(spans) => view! {
            <blockquote class="border-l-2 pl-3 text-muted-foreground italic">
                {inlines(spans)}
            </blockquote>
        }
        .into_any(),
        Block::Paragraph(spans) => view! { <p>{inlines(spans)}</p> }.into_any(),
        Block::Blank => view! { <div class="h-2" /> }.into_any(),
    }
}

#[component]
fn MarkdownView(source: String) -> impl IntoView {
    view! {
        <div class="space-y-2 text-sm leading-relaxed">
            {parse_blocks(&source).into_iter().map(render_block).collect_view()}
        </div>
    }
}

#[component]
pub fn CatatanDetailPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>().0;
    let params = use_params_map();
    let navigate = StoredValue::new(use_navigate());

    let catatan: RwSignal<Option<Catatan>> = RwSignal::new(None);
    let loading: RwSignal<bool> = RwSignal::new(true);
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let confirm_delete: RwSignal<bool> = RwSignal::new(false);
    let deleting: RwSignal<bool> = RwSignal::new(false);

    Effect::new(move |_| {
        let id = params.get().get("id").unwrap_or_default();
        if id.is_empty() {
            return;
        }
        let api_client = app_state.api_client.get_untracked();
        let Ok(user_id) = api_client.require_user_id() else {
            return;
        };

        loading.set(true);
        error.set(None);

        spawn_local(async move {
            match api_client.fetch_catatan(&id, &user_id).await {
                Ok(Some(row)) => catatan.set(Some(row)),
                Ok(None) => error.set(Some("Catatan tidak ditemukan".to_string())),
                Err(e) => {
                    if e.kind == ApiErrorKind::Unauthorized {
                        force_logout(app_state);
                        return;
                    }
                    error.set(Some(e.message));
                }
            }
            loading.set(false);
        });
    });

    let on_delete = move |_| {
        // First click arms, second click deletes.
        if !confirm_delete.get_untracked() {
            confirm_delete.set(true);
            return;
        }
        if deleting.get_untracked() {
            return;
        }

        let id = params.get_untracked().get("id").unwrap_or_default();
        let api_client = app_state.api_client.get_untracked();
        deleting.set(true);

        spawn_local(async move {
            match delete_catatan(&api_client, &id).await {
                Ok(()) => {
                    app_state.catatans.update(|list| list.retain(|c| c.id != id));
                    app_state.toast.set(Some(Toast::success("Catatan dihapus")));
                    load_sidebar_counts(app_state);
                    navigate.with_value(|nav| nav("/", Default::default()));
                }
                Err(SubmitError::Authentication) => {
                    force_logout(app_state);
                }
                Err(e) => {
                    error.set(Some(e.to_string()));
                    deleting.set(false);
                    confirm_delete.set(false);
                }
            }
        });
    };

    let edit_href = move || {
        let id = params.get().get("id").unwrap_or_default();
        format!("/catatan/{id}/edit")
    };

    view! {
        <div class="mx-auto max-w-3xl space-y-4 px-4 py-6">
            <ToastView />

            <a href="/" class="text-xs text-muted-foreground hover:text-foreground">
                "← Kembali"
            </a>

            <Show when=move || loading.get() fallback=|| ().into_view()>
                <div class="flex items-center gap-2 text-sm text-muted-foreground">
                    <Spinner />
                    "Memuat catatan..."
                </div>
            </Show>

            <Show when=move || error.get().is_some() fallback=|| ().into_view()>
                {move || {
                    error.get().map(|e| {
                        view! {
                            <Alert class="border-destructive/30">
                                <AlertDescription class="text-destructive text-xs">{e}</AlertDescription>
                            </Alert>
                        }
                    })
                }}
            </Show>

            {move || {
                catatan.get().map(|row| {
                    let kategori_nama = row.kategori_catatan.as_ref().map(|k| k.nama.clone());
                    let folder_nama = row.folder_catatan.as_ref().map(|f| f.nama.clone());
                    let body = row.isi_catatan.clone().unwrap_or_default();

                    view! {
                        <Card>
                            <CardHeader>
                                <div class="flex w-full items-start justify-between gap-3">
                                    <CardTitle class="text-lg">{row.judul_catatan.clone()}</CardTitle>
                                    <div class="flex shrink-0 items-center gap-2">
                                        <a
                                            href=edit_href()
                                            class="inline-flex h-8 items-center rounded-md border bg-border/30 px-3 text-sm font-medium shadow-xs hover:bg-border/50"
                                        >
                                            "Ubah"
                                        </a>
                                        <Button
                                            variant=ButtonVariant::Destructive
                                            size=ButtonSize::Sm
                                            attr:disabled=move || deleting.get()
                                            on:click=on_delete
                                        >
                                            {move || {
                                                if deleting.get() {
                                                    "Menghapus..."
                                                } else if confirm_delete.get() {
                                                    "Yakin? Klik lagi"
                                                } else {
                                                    "Hapus"
                                                }
                                            }}
                                        </Button>
                                    </div>
                                </div>
                                <CardDescription class="text-xs">
                                    {format!("Dibuat {}", format_date_ymd(&row.created_at))}
                                </CardDescription>
                                <div class="flex flex-wrap gap-1 pt-1">
                                    {row.pinned.then(|| view! {
                                        <span class="rounded bg-primary/10 px-1.5 py-0.5 text-[10px] text-primary">
                                            "Disematkan"
                                        </span>
                                    })}
                                    {row.is_archived.then(|| view! {
                                        <span class="rounded bg-muted px-1.5 py-0.5 text-[10px] text-muted-foreground">
                                            "Arsip"
                                        </span>
                                    })}
                                    {kategori_nama.map(|nama| view! {
                                        <span class="rounded-full border px-2 py-0.5 text-[10px]">{nama}</span>
                                    })}
                                    {folder_nama.map(|nama| view! {
                                        <span class="rounded-full border px-2 py-0.5 text-[10px]">{nama}</span>
                                    })}
                                </div>
                            </CardHeader>
                            <CardContent>
                                {if body.is_empty() {
                                    view! {
                                        <p class="text-xs text-muted-foreground">"Catatan ini kosong."</p>
                                    }
                                    .into_any()
                                } else {
                                    view! { <MarkdownView source=body /> }.into_any()
                                }}
                            </CardContent>
                        </Card>
                    }
                })
            }}
        </div>
    }
}

#[component]
pub fn CatatanEditPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>().0;
    let params = use_params_map();
    let navigate = StoredValue::new(use_navigate());

    let form = CatatanFormState::new(DraftSnapshot::default());
    let options = use_dynamic_options(vec![], vec![]);
    options.load_initial(app_state.api_client.get_untracked());

    let found: RwSignal<bool> = RwSignal::new(false);
    let loading: RwSignal<bool> = RwSignal::new(true);
    let load_error: RwSignal<Option<String>> = RwSignal::new(None);

    let phase: RwSignal<SubmitPhase> = RwSignal::new(SubmitPhase::Idle);
    let submit_error: RwSignal<Option<String>> = RwSignal::new(None);
    let busy = Signal::derive(move || phase.get().is_in_flight());

    Effect::new(move |_| {
        let id = params.get().get("id").unwrap_or_default();
        if id.is_empty() {
            return;
        }
        let api_client = app_state.api_client.get_untracked();
        let Ok(user_id) = api_client.require_user_id() else {
            return;
        };

        loading.set(true);
        load_error.set(None);

        spawn_local(async move {
            match api_client.fetch_catatan(&id, &user_id).await {
                Ok(Some(row)) => {
                    form.apply(snapshot_from_catatan(&row));
                    form.is_dirty.set(false);
                    found.set(true);
                }
                Ok(None) => load_error.set(Some("Catatan tidak ditemukan".to_string())),
                Err(e) => {
                    if e.kind == ApiErrorKind::Unauthorized {
                        force_logout(app_state);
                        return;
                    }
                    load_error.set(Some(e.message));
                }
            }
            loading.set(false);
        });
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        if !form.validate() {
            return;
        }
        submit_error.set(None);

        let id = params.get_untracked().get("id").unwrap_or_default();
        let api_client = app_state.api_client.get_untracked();
        let snapshot = form.snapshot();

        spawn_local(async move {
            let result = submit_catatan_update(
                &api_client,
                &app_state.store,
                &id,
                &snapshot,
                |p| phase.set(p),
            )
            .await;
            match result {
                Ok(outcome) => {
                    if let (Some(kategoris), Some(folders)) = (outcome.kategoris, outcome.folders)
                    {
                        options.apply_confirmed(kategoris, folders);
                    }
                    app_state
                        .toast
                        .set(Some(Toast::success("Perubahan disimpan")));
                    load_catatans(app_state);
                    load_sidebar_counts(app_state);
                    navigate.with_value(|nav| {
                        nav(&format!("/catatan/{id}"), Default::default());
                    });
                }
                Err(SubmitError::Validation(errors)) => {
                    form.errors.set(errors);
                }
                Err(SubmitError::Authentication) => {
                    force_logout(app_state);
                }
                Err(e) => {
                    submit_error.set(Some(e.to_string()));
                }
            }
        });
    };

    let back_href = move || {
        let id = params.get().get("id").unwrap_or_default();
        format!("/catatan/{id}")
    };

    view! {
        <div class="mx-auto max-w-3xl space-y-4 px-4 py-6">
            <ToastView />

            <a
                href=back_href
                class="text-xs text-muted-foreground hover:text-foreground"
            >
                "← Kembali"
            </a>

            <Show when=move || loading.get() fallback=|| ().into_view()>
                <div class="flex items-center gap-2 text-sm text-muted-foreground">
                    <Spinner />
                    "Memuat catatan..."
                </div>
            </Show>

            <Show when=move || load_error.get().is_some() fallback=|| ().into_view()>
                {move || {
                    load_error.get().map(|e| {
                        view! {
                            <Alert class="border-destructive/30">
                                <AlertDescription class="text-destructive text-xs">{e}</AlertDescription>
                            </Alert>
                        }
                    })
                }}
            </Show>

            <Show when=move || found.get() fallback=|| ().into_view()>
                <Card>
                    <CardHeader>
                        <CardTitle class="text-base">"Ubah Catatan"</CardTitle>
                    </CardHeader>
                    <CardContent>
                        <form
                            class="flex flex-col gap-3"
                            on:submit=on_submit
                            on:input=move |_| form.mark_dirty()
                            on:change=move |_| form.mark_dirty()
                        >
                            <CatatanFormFields form=form options=options />

                            <Show when=move || submit_error.get().is_some() fallback=|| ().into_view()>
                                {move || {
                                    submit_error.get().map(|e| {
                                        view! {
                                            <Alert class="border-destructive/30">
                                                <AlertDescription class="text-destructive text-xs">{e}</AlertDescription>
                                            </Alert>
                                        }
                                    })
                                }}
                            </Show>

                            <div class="flex items-center gap-2">
                                <Button size=ButtonSize::Sm attr:disabled=move || busy.get()>
                                    <span class="inline-flex items-center gap-2">
                                        <Show when=move || busy.get() fallback=|| ().into_view()>
                                            <Spinner />
                                        </Show>
                                        {move || submit_phase_label(phase.get())}
                                    </span>
                                </Button>
                                <Button
                                    variant=ButtonVariant::Outline
                                    size=ButtonSize::Sm
                                    attr:disabled=move || busy.get()
                                    on:click=move |ev: web_sys::MouseEvent| {
                                        ev.prevent_default();
                                        let id = params.get_untracked().get("id").unwrap_or_default();
                                        navigate.with_value(|nav| {
                                            nav(&format!("/catatan/{id}"), Default::default());
                                        });
                                    }
                                >
                                    "Batal"
                                </Button>
                            </div>
                        </form>
                    </CardContent>
                </Card>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_text_flattens_whitespace() {
        assert_eq!(preview_text("a\n\nb   c"), "a b c");
    }

    #[test]
    fn test_preview_text_truncates_on_char_boundary() {
        let long = "é".repeat(200);
        let preview = preview_text(&long);
        assert!(preview.ends_with('…'));
        assert_eq!(preview.chars().count(), 141);
    }

    #[test]
    fn test_preview_text_short_body_untouched() {
        assert_eq!(preview_text("belanja mingguan"), "belanja mingguan");
    }

    #[test]
    fn test_submit_phase_label_covers_in_flight_phases() {
        assert_eq!(submit_phase_label(SubmitPhase::Idle), "Simpan");
        assert_eq!(submit_phase_label(SubmitPhase::Persisting), "Menyimpan...");
        assert_eq!(submit_phase_label(SubmitPhase::Done), "Simpan");
    }
}
