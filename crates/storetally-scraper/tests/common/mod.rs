//! Scripted in-memory `UiDriver` for harvester and supervisor tests.
//!
//! A script is a list of screens; each screen is the list rows visible at one
//! scroll position, each row its label texts. Every swipe advances one screen
//! and stays on the last one once the list bottom is reached.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use storetally_driver::{DriverError, ElementRef, Locator, Swipe, UiDriver, WindowRect};
use storetally_scraper::screen;
use storetally_scraper::SessionFactory;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    SetImplicitWait(Duration),
    Click(String),
    Swipe(Swipe),
    CloseApp,
    Quit,
}

/// Where probing for the not-responding dialog goes wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogFault {
    /// The lookup itself fails with a server error.
    Lookup,
    /// The dialog is found but clicking it fails, so it stays up.
    Click,
}

#[derive(Debug, Clone)]
pub struct Script {
    pub total_label: String,
    pub screens: Vec<Vec<Vec<String>>>,
    pub dialog_visible: bool,
    pub dialog_fault: Option<DialogFault>,
    pub window: WindowRect,
    pub density: u32,
}

impl Script {
    pub fn new(total_label: &str, screens: Vec<Vec<Vec<String>>>) -> Self {
        Self {
            total_label: total_label.to_string(),
            screens,
            dialog_visible: false,
            dialog_fault: None,
            window: WindowRect {
                x: 0,
                y: 0,
                width: 1080,
                height: 2000,
            },
            density: 320,
        }
    }

    pub fn with_dialog(mut self) -> Self {
        self.dialog_visible = true;
        self
    }

    pub fn with_dialog_fault(mut self, fault: DialogFault) -> Self {
        self.dialog_visible = true;
        self.dialog_fault = Some(fault);
        self
    }
}

/// A complete row: name, three filler labels, sales, order count.
pub fn store_row(name: &str, sales: &str, orders: &str) -> Vec<String> {
    [name, "Open", "Today", "Sales", sales, orders]
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// A row cut off at the viewport edge.
pub fn partial_row(name: &str) -> Vec<String> {
    vec![name.to_string(), "Open".to_string()]
}

pub fn header_row() -> Vec<String> {
    vec!["All stores".to_string(), "Sort".to_string()]
}

/// Complete rows named `{prefix}{i}` for each `i` in `range`.
pub fn rows(prefix: &str, range: std::ops::Range<usize>) -> Vec<Vec<String>> {
    range
        .map(|i| store_row(&format!("{prefix}{i}"), &format!("¥{i},000"), &i.to_string()))
        .collect()
}

/// Concatenates groups of rows into one screen.
pub fn screen_of(parts: Vec<Vec<Vec<String>>>) -> Vec<Vec<String>> {
    parts.into_iter().flatten().collect()
}

struct State {
    position: usize,
    dialog_visible: bool,
}

pub struct ScriptedDriver {
    script: Script,
    state: Mutex<State>,
    calls: Arc<Mutex<Vec<Call>>>,
}

impl ScriptedDriver {
    pub fn new(script: Script, calls: Arc<Mutex<Vec<Call>>>) -> Self {
        let dialog_visible = script.dialog_visible;
        Self {
            script,
            state: Mutex::new(State {
                position: 0,
                dialog_visible,
            }),
            calls,
        }
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn position(&self) -> usize {
        self.state.lock().unwrap().position
    }

    fn server_error(context: &str) -> DriverError {
        DriverError::WebDriver {
            status: 500,
            error: "unknown error".to_string(),
            message: "instrumentation process is not running".to_string(),
            context: context.to_string(),
        }
    }

    fn missing(locator: &Locator) -> DriverError {
        DriverError::NoSuchElement {
            context: locator.to_string(),
        }
    }
}

impl UiDriver for ScriptedDriver {
    async fn find_element(&self, locator: &Locator) -> Result<ElementRef, DriverError> {
        if *locator == screen::stores_tab() {
            return Ok(ElementRef::new("tab"));
        }
        if *locator == screen::total_count_label() {
            return Ok(ElementRef::new("total"));
        }
        if *locator == screen::anr_wait_button() {
            if self.script.dialog_fault == Some(DialogFault::Lookup) {
                return Err(Self::server_error(&locator.to_string()));
            }
            if self.state.lock().unwrap().dialog_visible {
                return Ok(ElementRef::new("dialog"));
            }
        }
        Err(Self::missing(locator))
    }

    async fn find_elements(&self, locator: &Locator) -> Result<Vec<ElementRef>, DriverError> {
        if *locator != screen::store_rows() {
            return Ok(Vec::new());
        }
        let position = self.position();
        let count = self.script.screens.get(position).map_or(0, Vec::len);
        Ok((0..count)
            .map(|i| ElementRef::new(format!("row:{position}:{i}")))
            .collect())
    }

    async fn find_child_elements(
        &self,
        parent: &ElementRef,
        locator: &Locator,
    ) -> Result<Vec<ElementRef>, DriverError> {
        assert_eq!(*locator, Locator::class_name(screen::TEXT_VIEW_CLASS));
        let parts: Vec<usize> = parent
            .as_str()
            .strip_prefix("row:")
            .expect("child lookup on a non-row element")
            .split(':')
            .map(|p| p.parse().unwrap())
            .collect();
        let (position, row) = (parts[0], parts[1]);
        let labels = &self.script.screens[position][row];
        Ok((0..labels.len())
            .map(|k| ElementRef::new(format!("label:{position}:{row}:{k}")))
            .collect())
    }

    async fn click(&self, element: &ElementRef) -> Result<(), DriverError> {
        if element.as_str() == "dialog" {
            if self.script.dialog_fault == Some(DialogFault::Click) {
                return Err(Self::server_error("click"));
            }
            self.state.lock().unwrap().dialog_visible = false;
        }
        self.record(Call::Click(element.as_str().to_string()));
        Ok(())
    }

    async fn text(&self, element: &ElementRef) -> Result<String, DriverError> {
        if element.as_str() == "total" {
            return Ok(self.script.total_label.clone());
        }
        let parts: Vec<usize> = element
            .as_str()
            .strip_prefix("label:")
            .expect("text read on an unknown element")
            .split(':')
            .map(|p| p.parse().unwrap())
            .collect();
        Ok(self.script.screens[parts[0]][parts[1]][parts[2]].clone())
    }

    async fn window_rect(&self) -> Result<WindowRect, DriverError> {
        Ok(self.script.window)
    }

    async fn display_density(&self) -> Result<u32, DriverError> {
        Ok(self.script.density)
    }

    async fn swipe(&self, swipe: &Swipe) -> Result<(), DriverError> {
        let mut state = self.state.lock().unwrap();
        state.position = (state.position + 1).min(self.script.screens.len().saturating_sub(1));
        drop(state);
        self.record(Call::Swipe(*swipe));
        Ok(())
    }

    async fn set_implicit_wait(&self, wait: Duration) -> Result<(), DriverError> {
        self.record(Call::SetImplicitWait(wait));
        Ok(())
    }

    async fn close_app(&self) -> Result<(), DriverError> {
        self.record(Call::CloseApp);
        Ok(())
    }

    async fn quit(self) -> Result<(), DriverError> {
        self.record(Call::Quit);
        Ok(())
    }
}

/// Hands out a fresh `ScriptedDriver` per cycle, all sharing one call log.
pub struct ScriptedSessions {
    pub script: Script,
    pub calls: Arc<Mutex<Vec<Call>>>,
    pub refuse: bool,
}

impl ScriptedSessions {
    pub fn new(script: Script) -> Self {
        Self {
            script,
            calls: Arc::new(Mutex::new(Vec::new())),
            refuse: false,
        }
    }

    pub fn refusing(script: Script) -> Self {
        Self {
            refuse: true,
            ..Self::new(script)
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

impl SessionFactory for ScriptedSessions {
    type Driver = ScriptedDriver;

    async fn open(&self) -> Result<ScriptedDriver, DriverError> {
        if self.refuse {
            return Err(DriverError::WebDriver {
                status: 500,
                error: "session not created".to_string(),
                message: "no device".to_string(),
                context: "new session".to_string(),
            });
        }
        Ok(ScriptedDriver::new(
            self.script.clone(),
            Arc::clone(&self.calls),
        ))
    }
}

impl SessionFactory for &ScriptedSessions {
    type Driver = ScriptedDriver;

    async fn open(&self) -> Result<ScriptedDriver, DriverError> {
        <ScriptedSessions as SessionFactory>::open(*self).await
    }
}

pub fn swipes(calls: &[Call]) -> usize {
    calls.iter().filter(|c| matches!(c, Call::Swipe(_))).count()
}
