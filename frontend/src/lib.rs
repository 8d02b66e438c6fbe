use sauron::prelude::*;
use shared::{Todo, TodoError, TodoId, TodoRepository, TodoState, View};
use web_sys::window;

mod api;
mod controller;
mod form;
mod logging;
mod render;

pub use api::HttpStore;
pub use controller::Outcome;
pub use form::TodoForm;

use controller::{closes_modal, completion_target, PendingRequests, Submission};

const NOT_CREATED_ALERT: &str = "Cannot mark as complete as item has not been created yet!";

/// Element id of the modal backdrop; clicking it closes the modal.
pub(crate) const MODAL_LAYER_ID: &str = "modal_layer";

#[derive(Debug, Clone)]
pub enum Msg {
    // Loading
    LoadTodos,
    TodosLoaded(Vec<Todo>),
    Refetched(Vec<Todo>, Outcome),
    Failed(Option<TodoId>, TodoError),

    // Navigation
    NavigateTo(View),

    // Modal
    OpenNewForm,
    OpenEditForm(TodoId),
    CloseModal,
    SetTitle(String),
    SetDescription(String),
    SetDay(String),
    SetMonth(String),
    SetYear(String),
    SubmitForm,
    MarkComplete,

    // Rows
    ToggleComplete(TodoId),
    DeleteTodo(TodoId),
}

#[derive(Debug, Clone)]
pub struct Model {
    state: TodoState,
    repository: TodoRepository<HttpStore>,
    form: Option<TodoForm>,
    pending: PendingRequests,
}

impl Default for Model {
    fn default() -> Self {
        Self::new(HttpStore::default())
    }
}

impl Model {
    pub fn new(store: HttpStore) -> Self {
        Self {
            state: TodoState::new(),
            repository: TodoRepository::new(store),
            form: None,
            pending: PendingRequests::default(),
        }
    }

    fn is_pending(&self, id: TodoId) -> bool {
        self.pending.contains(id)
    }

    fn update_form(&mut self, edit: impl FnOnce(&mut TodoForm)) -> Cmd<Msg> {
        if let Some(form) = self.form.as_mut() {
            edit(form);
        }
        Cmd::none()
    }

    fn submit_form(&mut self) -> Cmd<Msg> {
        let Some(form) = self.form.clone() else {
            return Cmd::none();
        };
        let repository = self.repository.clone();

        match Submission::from_form(&form, &self.state) {
            Submission::Stale(id) => {
                log::warn!("todo {} disappeared while being edited", id);
                self.form = None;
                Cmd::none()
            }
            Submission::Update(todo, fields) => {
                if !self.pending.begin(todo.id) {
                    return Cmd::none();
                }
                Cmd::new(async move {
                    match repository.update(todo.id, &fields).await {
                        Ok(()) => {
                            let outcome = Outcome::Edited {
                                id: todo.id,
                                previous_due_date: todo.due_date,
                            };
                            refetch(repository, outcome).await
                        }
                        Err(error) => Msg::Failed(Some(todo.id), error),
                    }
                })
            }
            Submission::Create(fields) => {
                Cmd::new(async move {
                    match repository.create(&fields).await {
                        Ok(()) => refetch(repository, Outcome::Created).await,
                        Err(error) => Msg::Failed(None, error),
                    }
                })
            }
        }
    }

    fn mark_complete(&mut self) -> Cmd<Msg> {
        let Some(todo) = completion_target(self.form.as_ref(), &self.state) else {
            alert(NOT_CREATED_ALERT);
            return Cmd::none();
        };
        if !self.pending.begin(todo.id) {
            return Cmd::none();
        }

        let repository = self.repository.clone();
        Cmd::new(async move {
            match repository.mark_complete(&todo).await {
                Ok(()) => refetch(repository, Outcome::Changed(todo.id)).await,
                Err(error) => Msg::Failed(Some(todo.id), error),
            }
        })
    }

    fn toggle_complete(&mut self, id: TodoId) -> Cmd<Msg> {
        let Some(todo) = self.state.find(id).cloned() else {
            log::warn!("toggle requested for unknown todo {}", id);
            return Cmd::none();
        };
        if !self.pending.begin(id) {
            return Cmd::none();
        }

        let repository = self.repository.clone();
        Cmd::new(async move {
            match repository.toggle_complete(&todo).await {
                Ok(()) => refetch(repository, Outcome::Changed(id)).await,
                Err(error) => Msg::Failed(Some(id), error),
            }
        })
    }

    fn delete_todo(&mut self, id: TodoId) -> Cmd<Msg> {
        if !self.pending.begin(id) {
            return Cmd::none();
        }

        let repository = self.repository.clone();
        Cmd::new(async move {
            match repository.remove(id).await {
                Ok(()) => refetch(repository, Outcome::Changed(id)).await,
                Err(error) => Msg::Failed(Some(id), error),
            }
        })
    }
}

impl Application for Model {
    type MSG = Msg;

    fn init(&mut self) -> Cmd<Msg> {
        setup_escape_listener();
        Cmd::new(async { Msg::LoadTodos })
    }

    fn update(&mut self, msg: Msg) -> Cmd<Msg> {
        match msg {
            Msg::LoadTodos => {
                let repository = self.repository.clone();
                Cmd::new(async move {
                    match repository.fetch_all().await {
                        Ok(todos) => Msg::TodosLoaded(todos),
                        Err(error) => Msg::Failed(None, error),
                    }
                })
            }
            Msg::TodosLoaded(todos) => {
                log::info!("loaded {} todos", todos.len());
                self.state.replace_todos(todos);
                self.state.navigate(View::AllTodos);
                Cmd::none()
            }
            Msg::Refetched(todos, outcome) => {
                self.pending.finish(outcome.id());
                outcome.apply(&mut self.state, todos);
                self.form = None;
                Cmd::none()
            }
            Msg::Failed(id, error) => {
                self.pending.finish(id);
                if error.is_user_facing() {
                    alert(&error.to_string());
                } else {
                    log::error!("todo request failed: {}", error);
                }
                Cmd::none()
            }
            Msg::NavigateTo(view) => {
                self.state.navigate(view);
                Cmd::none()
            }
            Msg::OpenNewForm => {
                self.form = Some(TodoForm::default());
                Cmd::none()
            }
            Msg::OpenEditForm(id) => {
                self.form = self.state.find(id).map(TodoForm::for_todo);
                Cmd::none()
            }
            Msg::CloseModal => {
                self.form = None;
                Cmd::none()
            }
            Msg::SetTitle(title) => self.update_form(|form| form.title = title),
            Msg::SetDescription(description) => {
                self.update_form(|form| form.description = description)
            }
            Msg::SetDay(day) => self.update_form(|form| form.day = day),
            Msg::SetMonth(month) => self.update_form(|form| form.month = month),
            Msg::SetYear(year) => self.update_form(|form| form.year = year),
            Msg::SubmitForm => self.submit_form(),
            Msg::MarkComplete => self.mark_complete(),
            Msg::ToggleComplete(id) => self.toggle_complete(id),
            Msg::DeleteTodo(id) => self.delete_todo(id),
        }
    }

    fn view(&self) -> Node<Msg> {
        self.view_page()
    }
}

async fn refetch(repository: TodoRepository<HttpStore>, outcome: Outcome) -> Msg {
    match repository.fetch_all().await {
        Ok(todos) => Msg::Refetched(todos, outcome),
        Err(error) => Msg::Failed(outcome.id(), error),
    }
}

/// Escape closes the modal wherever focus is, so the keyup is caught on the
/// document and turned into a click on the backdrop.
fn setup_escape_listener() {
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;

    let Some(document) = window().and_then(|w| w.document()) else {
        return;
    };

    let callback = Closure::wrap(Box::new(|event: web_sys::KeyboardEvent| {
        if !closes_modal(&event.key()) {
            return;
        }
        let layer = window()
            .and_then(|w| w.document())
            .and_then(|document| document.get_element_by_id(MODAL_LAYER_ID))
            .and_then(|element| element.dyn_into::<web_sys::HtmlElement>().ok());
        if let Some(layer) = layer {
            layer.click();
        }
    }) as Box<dyn FnMut(_)>);

    if let Err(error) =
        document.add_event_listener_with_callback("keyup", callback.as_ref().unchecked_ref())
    {
        log::error!("failed to listen for keyup: {:?}", error);
    }
    callback.forget();
}

fn alert(message: &str) {
    if let Some(window) = window() {
        let _ = window.alert_with_message(message);
    }
}

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    logging::init_logging();
    Program::mount_to_body(Model::default());
}
