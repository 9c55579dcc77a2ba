//! Menu strip menus: header hit boxes, drop-down panels and their items.

use gemos_abi::Rect;

use crate::registry::WindowRegistry;
use crate::theme::{MENU_BAR_HEIGHT, ThemePreset};

pub const MENU_PANEL_WIDTH: i32 = 120;
pub const MENU_ITEM_HEIGHT: i32 = 25;
/// First item row; one pixel below the strip's bottom rule.
pub const MENU_ITEMS_TOP: i32 = MENU_BAR_HEIGHT + 1;
const MENU_PANEL_TAIL: i32 = 5;

/// What a menu item asks the application layer to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    About,
    Settings,
    Restart,
    /// Start the named application.
    Launch(&'static str),
}

pub struct MenuItem {
    pub label: &'static str,
    pub action: MenuAction,
}

pub const SYSTEM_MENU_ITEMS: [MenuItem; 3] = [
    MenuItem {
        label: "About GemOS",
        action: MenuAction::About,
    },
    MenuItem {
        label: "Settings",
        action: MenuAction::Settings,
    },
    MenuItem {
        label: "Restart",
        action: MenuAction::Restart,
    },
];

pub const APPS_MENU_ITEMS: [MenuItem; 6] = [
    MenuItem {
        label: "Notepad",
        action: MenuAction::Launch("Notepad"),
    },
    MenuItem {
        label: "Snake",
        action: MenuAction::Launch("Snake"),
    },
    MenuItem {
        label: "Paint",
        action: MenuAction::Launch("Paint"),
    },
    MenuItem {
        label: "Calculator",
        action: MenuAction::Launch("Calculator"),
    },
    MenuItem {
        label: "Solitaire",
        action: MenuAction::Launch("Solitaire"),
    },
    MenuItem {
        label: "Minesweeper",
        action: MenuAction::Launch("Minesweeper"),
    },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuKind {
    System,
    Apps,
}

impl MenuKind {
    pub const ALL: [MenuKind; 2] = [MenuKind::System, MenuKind::Apps];

    pub const fn label(self) -> &'static str {
        match self {
            MenuKind::System => "GemOS",
            MenuKind::Apps => "Apps",
        }
    }

    pub fn items(self) -> &'static [MenuItem] {
        match self {
            MenuKind::System => &SYSTEM_MENU_ITEMS,
            MenuKind::Apps => &APPS_MENU_ITEMS,
        }
    }

    /// Clickable header box in the menu strip.
    pub const fn header(self) -> Rect {
        match self {
            MenuKind::System => Rect::new(5, 0, 60, MENU_BAR_HEIGHT),
            MenuKind::Apps => Rect::new(70, 0, 50, MENU_BAR_HEIGHT),
        }
    }

    /// Drop-down panel, hanging from the strip under the header.
    pub fn panel(self) -> Rect {
        let rows = self.items().len() as i32;
        Rect::new(
            self.header().x,
            MENU_BAR_HEIGHT,
            MENU_PANEL_WIDTH,
            rows * MENU_ITEM_HEIGHT + MENU_PANEL_TAIL,
        )
    }

    /// Highlight box of item `index`, inside the panel border.
    pub fn item_rect(self, index: usize) -> Rect {
        let panel = self.panel();
        Rect::new(
            panel.x + 1,
            MENU_ITEMS_TOP + index as i32 * MENU_ITEM_HEIGHT,
            MENU_PANEL_WIDTH - 2,
            MENU_ITEM_HEIGHT,
        )
    }

    /// Item under the screen point, if any.
    pub fn item_at(self, x: i32, y: i32) -> Option<usize> {
        let panel = self.panel();
        if x < panel.x || x >= panel.right() || y < MENU_ITEMS_TOP {
            return None;
        }
        let idx = ((y - MENU_ITEMS_TOP) / MENU_ITEM_HEIGHT) as usize;
        (idx < self.items().len()).then_some(idx)
    }

    /// Header under the screen point, if any.
    pub fn header_at(x: i32, y: i32) -> Option<MenuKind> {
        Self::ALL.into_iter().find(|kind| kind.header().contains(x, y))
    }
}

/// Desktop-wide change a launcher can hand back, applied by the desktop
/// once the click that produced it has been routed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DesktopRequest {
    SetTheme(ThemePreset),
}

/// Application-layer handler for menu actions.
///
/// Gets the registry so it can open windows (and attach their apps) for
/// the action it was handed. Anything beyond windows, such as a theme
/// switch from Settings, goes back as a [`DesktopRequest`].
pub trait Launcher {
    fn launch(&mut self, action: MenuAction, windows: &mut WindowRegistry)
    -> Option<DesktopRequest>;
}

/// Launcher that ignores every action.
pub struct NoLauncher;

impl Launcher for NoLauncher {
    fn launch(
        &mut self,
        _action: MenuAction,
        _windows: &mut WindowRegistry,
    ) -> Option<DesktopRequest> {
        None
    }
}
