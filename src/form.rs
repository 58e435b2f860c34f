use chrono::{Local, NaiveDate};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

use crate::constants::DATE_FORMAT;
use crate::schema::{EntityConfig, FieldKind, FieldSpec};

/// Read/reset access to a form's inputs, by field name.
pub trait FormInputs {
    fn value(&self, field: &str) -> Option<&str>;
    fn kind(&self, field: &str) -> Option<FieldKind>;
    fn reset(&mut self);
}

pub struct FieldInput {
    pub spec: &'static FieldSpec,
    pub input: Input,
}

impl FieldInput {
    fn new(spec: &'static FieldSpec) -> Self {
        Self {
            spec,
            input: Input::default(),
        }
    }

    pub fn value(&self) -> &str {
        self.input.value()
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.input = Input::new(value.into());
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match self.spec.kind {
            FieldKind::Text => {
                self.input.handle_event(&Event::Key(key));
            }
            FieldKind::Date => self.handle_date_key(key),
        }
    }

    /// Date picker: digits and `-` are typed, `[`/`]` step a day, `t` is today.
    /// Ctrl/Alt chords keep their usual editing meaning.
    fn handle_date_key(&mut self, key: KeyEvent) {
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            self.input.handle_event(&Event::Key(key));
            return;
        }
        match key.code {
            KeyCode::Char(']') => self.step_date(1),
            KeyCode::Char('[') => self.step_date(-1),
            KeyCode::Char('t') => self.set_date(Local::now().date_naive()),
            KeyCode::Char(c) if c.is_ascii_digit() || c == '-' => {
                self.input.handle_event(&Event::Key(key));
            }
            KeyCode::Char(_) => {}
            _ => {
                self.input.handle_event(&Event::Key(key));
            }
        }
    }

    fn step_date(&mut self, days: i64) {
        let current = NaiveDate::parse_from_str(self.value().trim(), DATE_FORMAT)
            .unwrap_or_else(|_| Local::now().date_naive());
        let stepped = if days >= 0 {
            current.checked_add_days(chrono::Days::new(days as u64))
        } else {
            current.checked_sub_days(chrono::Days::new(days.unsigned_abs()))
        };
        if let Some(date) = stepped {
            self.set_date(date);
        }
    }

    fn set_date(&mut self, date: NaiveDate) {
        self.set_value(date.format(DATE_FORMAT).to_string());
    }
}

/// One tab's worth of inputs, built from an entity's configuration.
pub struct Form {
    pub entity: &'static EntityConfig,
    pub inputs: Vec<FieldInput>,
}

impl Form {
    /// One input per configured field, in field order; date-typed fields get the
    /// date picker.
    pub fn new(entity: &'static EntityConfig) -> Self {
        Self {
            entity,
            inputs: entity.fields.iter().map(FieldInput::new).collect(),
        }
    }

    pub fn input(&self, field: &str) -> Option<&FieldInput> {
        self.inputs.iter().find(|i| i.spec.name == field)
    }

    pub fn input_mut(&mut self, field: &str) -> Option<&mut FieldInput> {
        self.inputs.iter_mut().find(|i| i.spec.name == field)
    }

    pub fn set(&mut self, field: &str, value: &str) {
        if let Some(input) = self.input_mut(field) {
            input.set_value(value);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.iter().all(|i| i.value().is_empty())
    }
}

impl FormInputs for Form {
    fn value(&self, field: &str) -> Option<&str> {
        self.input(field).map(FieldInput::value)
    }

    fn kind(&self, field: &str) -> Option<FieldKind> {
        self.entity.field(field).map(|f| f.kind)
    }

    fn reset(&mut self) {
        for input in &mut self.inputs {
            input.input.reset();
        }
    }
}
