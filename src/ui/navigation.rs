// Navigation stack for the two-screen UI
//
// The root screen lists the destinations; opening one pushes it, "back" pops it.

/// A screen the window can show
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    /// Navigation root listing [`DESTINATIONS`]
    Root,
    /// Live counter screen
    Counter,
    /// Placeholder destination with no content
    FavoritePrimes,
}

impl Screen {
    /// Title shown in the navigation bar
    ///
    /// The placeholder screen has no title of its own.
    pub fn title(self) -> &'static str {
        match self {
            Screen::Root => "State management",
            Screen::Counter => "Counter demo",
            Screen::FavoritePrimes => "",
        }
    }

    /// Index used by the Slint `current-screen` property
    pub fn index(self) -> i32 {
        match self {
            Screen::Root => 0,
            Screen::Counter => 1,
            Screen::FavoritePrimes => 2,
        }
    }
}

/// An entry in the root list
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Destination {
    pub label: &'static str,
    pub screen: Screen,
    pub is_placeholder: bool,
}

/// Destinations offered by the root screen, in display order
pub const DESTINATIONS: [Destination; 2] = [
    Destination {
        label: "Counter demo",
        screen: Screen::Counter,
        is_placeholder: false,
    },
    Destination {
        label: "Favorite primes",
        screen: Screen::FavoritePrimes,
        is_placeholder: true,
    },
];

/// Stack of open screens. The root is always at the bottom.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Navigator {
    stack: Vec<Screen>,
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            stack: vec![Screen::Root],
        }
    }

    pub fn current(&self) -> Screen {
        self.stack.last().copied().unwrap_or(Screen::Root)
    }

    pub fn push(&mut self, screen: Screen) {
        tracing::debug!("Navigating to {:?}", screen);
        self.stack.push(screen);
    }

    /// Open the destination at `index` in [`DESTINATIONS`]
    ///
    /// Returns the opened screen, or `None` for an out-of-range index.
    pub fn open(&mut self, index: usize) -> Option<Screen> {
        let destination = DESTINATIONS.get(index)?;
        self.push(destination.screen);
        Some(destination.screen)
    }

    /// Pop the top screen. Popping the root is a no-op returning `None`.
    pub fn pop(&mut self) -> Option<Screen> {
        if !self.can_go_back() {
            return None;
        }
        let popped = self.stack.pop();
        tracing::debug!("Navigated back to {:?}", self.current());
        popped
    }

    pub fn can_go_back(&self) -> bool {
        self.stack.len() > 1
    }

    pub fn title(&self) -> &'static str {
        self.current().title()
    }

    /// Label for the back button: the title of the screen underneath
    pub fn back_label(&self) -> &'static str {
        match self.stack.len() {
            0 | 1 => "",
            n => self.stack[n - 2].title(),
        }
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}
