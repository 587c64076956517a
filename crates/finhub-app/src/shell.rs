/// Bottom-navigation destinations. Only some tabs have content today; the
/// rest render the placeholder screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Home,
    Cards,
    Add,
    Exchange,
    Profile,
}

impl Tab {
    pub fn all() -> [Tab; 5] {
        [Tab::Home, Tab::Cards, Tab::Add, Tab::Exchange, Tab::Profile]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Home => "Home",
            Tab::Cards => "Cards",
            Tab::Add => "Add",
            Tab::Exchange => "Exchange",
            Tab::Profile => "Profile",
        }
    }

    /// Whether the tab has a real screen behind it, or the "Coming Soon"
    /// placeholder.
    pub fn content_available(&self) -> bool {
        matches!(self, Tab::Home | Tab::Exchange | Tab::Profile)
    }
}

/// Interaction state of the main shell: which tab is active, whether the
/// floating chat is open, whether balances are shown, which card is focused.
#[derive(Debug, Clone)]
pub struct Shell {
    active_tab: Tab,
    chat_open: bool,
    balances_visible: bool,
    active_card: usize,
}

impl Shell {
    pub fn new() -> Self {
        Self {
            active_tab: Tab::default(),
            chat_open: false,
            balances_visible: true,
            active_card: 0,
        }
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
    }

    pub fn chat_open(&self) -> bool {
        self.chat_open
    }

    pub fn set_chat_open(&mut self, open: bool) {
        self.chat_open = open;
    }

    pub fn balances_visible(&self) -> bool {
        self.balances_visible
    }

    /// Flips balance visibility and returns the new value.
    pub fn toggle_balances(&mut self) -> bool {
        self.balances_visible = !self.balances_visible;
        self.balances_visible
    }

    pub fn active_card(&self) -> usize {
        self.active_card
    }

    /// Focuses a card in the carousel, clamped to the available range.
    pub fn select_card(&mut self, index: usize, card_count: usize) {
        self.active_card = if card_count == 0 {
            0
        } else {
            index.min(card_count - 1)
        };
    }
}

impl Default for Shell {
    fn default() -> Self {
        Self::new()
    }
}
