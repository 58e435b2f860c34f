//! CRUD dispatch: turn a form action into a stored-procedure call plus the
//! notices the user sees.
//!
//! A failed database call is reported as an error and nothing else: the
//! success notice is withheld and the form keeps its values so the user can
//! correct them and try again.

use chrono::NaiveDate;

use crate::actions::Action;
use crate::constants::*;
use crate::db::ProcedureExecutor;
use crate::form::FormInputs;
use crate::schema::{EntityConfig, FieldKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warning,
    Error,
}

/// A modal message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: Level,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn new(level: Level, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            message: message.into(),
        }
    }
}

pub trait Notifier {
    fn notify(&mut self, notice: Notice);

    fn info(&mut self, title: &str, message: &str) {
        self.notify(Notice::new(Level::Info, title, message));
    }

    fn warn(&mut self, title: &str, message: &str) {
        self.notify(Notice::new(Level::Warning, title, message));
    }

    fn error(&mut self, title: &str, message: &str) {
        self.notify(Notice::new(Level::Error, title, message));
    }
}

impl Notifier for Vec<Notice> {
    fn notify(&mut self, notice: Notice) {
        self.push(notice);
    }
}

/// Yes/no question put to the user before a destructive call.
pub trait Confirm {
    fn confirm(&mut self, title: &str, message: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str, &str) -> bool,
{
    fn confirm(&mut self, title: &str, message: &str) -> bool {
        self(title, message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Client-side validation failed; the database was not contacted.
    Rejected,
    /// The user declined the confirmation.
    Cancelled,
    Committed,
    Failed,
    Cleared,
}

/// A delete that passed validation and waits for the user's confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub procedure: &'static str,
    pub id: String,
}

pub struct Dispatcher<X> {
    executor: X,
}

impl<X: ProcedureExecutor> Dispatcher<X> {
    pub fn new(executor: X) -> Self {
        Self { executor }
    }

    pub fn executor(&self) -> &X {
        &self.executor
    }

    /// Insert: every field in `field_names` must be filled in.
    pub fn save<I, N>(
        &self,
        procedure: &str,
        inputs: &mut I,
        field_names: &[&str],
        notifier: &mut N,
    ) -> Outcome
    where
        I: FormInputs,
        N: Notifier,
    {
        self.write(procedure, inputs, field_names, notifier, MSG_SAVED)
    }

    /// Same contract as [`Dispatcher::save`]; `field_names` includes the ID.
    pub fn update<I, N>(
        &self,
        procedure: &str,
        inputs: &mut I,
        field_names: &[&str],
        notifier: &mut N,
    ) -> Outcome
    where
        I: FormInputs,
        N: Notifier,
    {
        self.write(procedure, inputs, field_names, notifier, MSG_UPDATED)
    }

    fn write<I, N>(
        &self,
        procedure: &str,
        inputs: &mut I,
        field_names: &[&str],
        notifier: &mut N,
        success: &str,
    ) -> Outcome
    where
        I: FormInputs,
        N: Notifier,
    {
        let values = match collect_values(&*inputs, field_names) {
            Ok(values) => values,
            Err(message) => {
                log::warn!("{procedure} rejected: {message}");
                notifier.warn(TITLE_WARNING, &message);
                return Outcome::Rejected;
            }
        };

        if !self.run(procedure, &values, notifier) {
            return Outcome::Failed;
        }

        notifier.info(TITLE_SUCCESS, success);
        inputs.reset();
        Outcome::Committed
    }

    /// Blank check for a delete. Warns and returns `None` when there is no ID.
    pub fn prepare_delete<N: Notifier>(
        &self,
        procedure: &'static str,
        id_value: &str,
        notifier: &mut N,
    ) -> Option<PendingDelete> {
        if id_value.trim().is_empty() {
            log::warn!("{procedure} rejected: blank id");
            notifier.warn(TITLE_WARNING, MSG_VALID_ID);
            return None;
        }
        Some(PendingDelete {
            procedure,
            id: id_value.to_string(),
        })
    }

    /// Runs a confirmed delete. The form is left as it is.
    pub fn execute_delete<N: Notifier>(&self, pending: PendingDelete, notifier: &mut N) -> Outcome {
        if !self.run(pending.procedure, &[pending.id], notifier) {
            return Outcome::Failed;
        }
        notifier.info(TITLE_SUCCESS, MSG_DELETED);
        Outcome::Committed
    }

    pub fn delete<N, C>(
        &self,
        procedure: &'static str,
        id_value: &str,
        notifier: &mut N,
        confirm: &mut C,
    ) -> Outcome
    where
        N: Notifier,
        C: Confirm,
    {
        let Some(pending) = self.prepare_delete(procedure, id_value, notifier) else {
            return Outcome::Rejected;
        };
        if !confirm.confirm(TITLE_CONFIRM, MSG_CONFIRM_DELETE) {
            log::info!("{} of id {:?} cancelled", pending.procedure, pending.id);
            return Outcome::Cancelled;
        }
        self.execute_delete(pending, notifier)
    }

    pub fn clear<I: FormInputs>(&self, inputs: &mut I) -> Outcome {
        inputs.reset();
        Outcome::Cleared
    }

    fn run<N: Notifier>(&self, procedure: &str, args: &[String], notifier: &mut N) -> bool {
        match self.executor.call(procedure, args) {
            Ok(()) => true,
            Err(e) => {
                notifier.error(TITLE_DB_ERROR, &format!("Error: {e}"));
                false
            }
        }
    }
}

/// Values for `field_names` in order, or the warning to show.
fn collect_values<I: FormInputs>(
    inputs: &I,
    field_names: &[&str],
) -> Result<Vec<String>, String> {
    let mut values = Vec::with_capacity(field_names.len());
    for name in field_names {
        let value = inputs.value(name).unwrap_or_default();
        if value.trim().is_empty() {
            return Err(MSG_ALL_REQUIRED.to_string());
        }
        values.push(value.to_string());
    }

    for (name, value) in field_names.iter().zip(&values) {
        if inputs.kind(name) == Some(FieldKind::Date) && !is_date(value.trim()) {
            return Err(format!("{name} must be a date (YYYY-MM-DD)"));
        }
    }

    Ok(values)
}

/// Exactly `YYYY-MM-DD`: chrono alone also takes `2025-1-5` and signed years.
fn is_date(value: &str) -> bool {
    value.len() == 10
        && value.starts_with(|c: char| c.is_ascii_digit())
        && NaiveDate::parse_from_str(value, DATE_FORMAT)
        .is_ok_and(|date| date.format(DATE_FORMAT).to_string() == value)
}

/// Result of pressing one of the action bar buttons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Triggered {
    Done(Outcome),
    AwaitingConfirmation(PendingDelete),
}

/// Binds one entity's configuration to the dispatcher: which procedure and
/// which fields each action uses.
pub struct FormController<'d, X> {
    entity: &'static EntityConfig,
    dispatcher: &'d Dispatcher<X>,
}

impl<'d, X: ProcedureExecutor> FormController<'d, X> {
    pub fn new(entity: &'static EntityConfig, dispatcher: &'d Dispatcher<X>) -> Self {
        Self { entity, dispatcher }
    }

    pub fn save<I: FormInputs, N: Notifier>(&self, inputs: &mut I, notifier: &mut N) -> Outcome {
        let fields = self.entity.insert_fields();
        self.dispatcher
            .save(self.entity.procedures.insert, inputs, &fields, notifier)
    }

    pub fn update<I: FormInputs, N: Notifier>(&self, inputs: &mut I, notifier: &mut N) -> Outcome {
        let fields = self.entity.update_fields();
        self.dispatcher
            .update(self.entity.procedures.update, inputs, &fields, notifier)
    }

    pub fn delete<I, N, C>(&self, inputs: &I, notifier: &mut N, confirm: &mut C) -> Outcome
    where
        I: FormInputs,
        N: Notifier,
        C: Confirm,
    {
        let id = inputs.value(self.entity.id_field).unwrap_or_default();
        self.dispatcher
            .delete(self.entity.procedures.delete, id, notifier, confirm)
    }

    pub fn request_delete<I: FormInputs, N: Notifier>(
        &self,
        inputs: &I,
        notifier: &mut N,
    ) -> Option<PendingDelete> {
        let id = inputs.value(self.entity.id_field).unwrap_or_default();
        self.dispatcher
            .prepare_delete(self.entity.procedures.delete, id, notifier)
    }

    pub fn clear<I: FormInputs>(&self, inputs: &mut I) -> Outcome {
        self.dispatcher.clear(inputs)
    }

    /// Runs `action`. Delete stops short of the call and hands back the
    /// pending request for the front-end to confirm.
    pub fn trigger<I: FormInputs, N: Notifier>(
        &self,
        action: Action,
        inputs: &mut I,
        notifier: &mut N,
    ) -> Triggered {
        match action {
            Action::Save => Triggered::Done(self.save(inputs, notifier)),
            Action::Update => Triggered::Done(self.update(inputs, notifier)),
            Action::Delete => match self.request_delete(&*inputs, notifier) {
                Some(pending) => Triggered::AwaitingConfirmation(pending),
                None => Triggered::Done(Outcome::Rejected),
            },
            Action::Clear => Triggered::Done(self.clear(inputs)),
        }
    }
}
