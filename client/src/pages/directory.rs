//! People directory with search, department filter, and feedback shortcuts.

use leptos::prelude::*;

use crate::components::feedback_modal::FeedbackModal;
use crate::net::http::ApiClient;
use crate::net::types::{Coworker, FeedbackListItem};
use crate::state::auth::AuthState;
use crate::state::directory::{self, DirectoryFilterState};
use crate::util::task::spawn;

#[component]
pub fn DirectoryPage() -> impl IntoView {
    let auth_state = expect_context::<RwSignal<AuthState>>();
    let client = expect_context::<ApiClient>();

    let filters = RwSignal::new(DirectoryFilterState::default());
    let people = RwSignal::new(Vec::<Coworker>::new());
    let loading = RwSignal::new(true);
    let error = RwSignal::new(None::<String>);
    let feedback_target = RwSignal::new(None::<(String, String)>);
    let notice = RwSignal::new(None::<String>);

    // Typing only touches the form; this changes on submit and reset.
    let applied = Memo::new(move |_| filters.with(|f| f.applied.to_filters()));

    Effect::new(move || {
        let query = applied.get();
        loading.set(true);
        error.set(None);
        let client = client.clone();
        spawn(async move {
            match directory::load_directory(&client, &query).await {
                Ok(found) => people.set(found),
                Err(message) => {
                    people.set(Vec::new());
                    error.set(Some(message));
                }
            }
            loading.set(false);
        });
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        filters.update(|f| {
            f.apply();
        });
    };
    let on_reset = move |_| {
        filters.update(|f| {
            f.reset();
        });
    };

    let department_options = move || {
        let selected = filters.with(|f| f.form.department.clone());
        let mut names = people.with(|p| directory::departments(p));
        if !selected.is_empty() && !names.contains(&selected) {
            names.push(selected.clone());
            names.sort();
        }
        names
            .into_iter()
            .map(|name| {
                let is_selected = name == selected;
                view! { <option value=name.clone() selected=is_selected>{name.clone()}</option> }
            })
            .collect::<Vec<_>>()
    };

    let viewer_id = move || auth_state.with(|a| a.user_id().map(str::to_owned));
    let close_modal = Callback::new(move |()| feedback_target.set(None));
    let on_created = Callback::new(move |item: FeedbackListItem| {
        notice.set(Some(format!("Feedback sent to {}.", item.recipient.display_name())));
    });

    let open_feedback = Callback::new(move |target: (String, String)| feedback_target.set(Some(target)));

    let cards = move || {
        let me = viewer_id();
        people
            .get()
            .into_iter()
            .map(|person| {
                let is_me = me.as_deref() == Some(person.user_id.as_str());
                view! {
                    <CoworkerCard
                        person=person
                        is_me=is_me
                        on_feedback=open_feedback
                    />
                }
            })
            .collect::<Vec<_>>()
    };

    view! {
        <div class="directory-page">
            <header class="directory-page__header">
                <a class="btn btn--link" href="/">"← Home"</a>
                <h1>"People Directory"</h1>
            </header>

            <form class="directory-filters" on:submit=on_submit>
                <input
                    class="directory-filters__search"
                    type="search"
                    placeholder="Search by name, title or employee ID"
                    prop:value=move || filters.with(|f| f.form.search.clone())
                    on:input=move |ev| filters.update(|f| f.form.search = event_target_value(&ev))
                />
                <select
                    class="directory-filters__department"
                    on:change=move |ev| filters.update(|f| f.form.department = event_target_value(&ev))
                >
                    <option value="" selected=move || filters.with(|f| f.form.department.is_empty())>
                        "All departments"
                    </option>
                    {department_options}
                </select>
                <button type="submit" class="btn btn--primary">"Search"</button>
                <button type="button" class="btn" on:click=on_reset>"Reset"</button>
            </form>

            <Show when=move || notice.get().is_some()>
                <p class="banner banner--success">{move || notice.get().unwrap_or_default()}</p>
            </Show>
            <Show when=move || error.get().is_some()>
                <p class="banner banner--error">{move || error.get().unwrap_or_default()}</p>
            </Show>

            <Show when=move || !loading.get() fallback=|| view! { <p class="page-loading">"Loading coworkers..."</p> }>
                <Show
                    when=move || !people.with(Vec::is_empty)
                    fallback=|| view! { <p class="directory-page__empty">"No coworkers match these filters."</p> }
                >
                    <div class="directory-grid">{cards}</div>
                </Show>
            </Show>

            {move || {
                feedback_target
                    .get()
                    .map(|(id, name)| {
                        view! {
                            <FeedbackModal
                                recipient_id=id
                                recipient_name=name
                                on_close=close_modal
                                on_created=on_created
                            />
                        }
                    })
            }}
        </div>
    }
}

#[component]
fn CoworkerCard(person: Coworker, is_me: bool, on_feedback: Callback<(String, String)>) -> impl IntoView {
    let (name, initials) = directory::card_title(&person);
    let job_line = directory::job_line(&person);
    let location = directory::location_label(&person);
    let recipient = (person.user_id.clone(), directory::recipient_name(&person));
    let href = format!("/profile/{}", person.user_id);
    let direct_report = person.direct_report;

    view! {
        <article class="coworker-card">
            <div class="coworker-card__avatar">
                {match person.profile_photo_url.clone().filter(|u| !u.is_empty()) {
                    Some(src) => view! { <img src=src alt=name.clone()/> }.into_any(),
                    None => view! { <span class="coworker-card__initials">{initials}</span> }.into_any(),
                }}
            </div>
            <div class="coworker-card__body">
                <h3 class="coworker-card__name">
                    {name.clone()}
                    <Show when=move || direct_report>
                        <span class="pill pill--report">"Direct Report"</span>
                    </Show>
                </h3>
                <p class="coworker-card__job">{job_line}</p>
                <p class="coworker-card__meta">
                    <span>{person.employee_id.clone()}</span>
                    {location.map(|l| view! { <span class="coworker-card__location">{l}</span> })}
                </p>
            </div>
            <div class="coworker-card__actions">
                <a class="btn" href=href>"View Profile"</a>
                <Show when=move || !is_me>
                    <button class="btn btn--primary" on:click={
                        let recipient = recipient.clone();
                        move |_| on_feedback.run(recipient.clone())
                    }>
                        "Give Feedback"
                    </button>
                </Show>
            </div>
        </article>
    }
}
