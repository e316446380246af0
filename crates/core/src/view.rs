//! Overlay visibility flags.

use serde::{Deserialize, Serialize};

/// Which overlays are currently shown.
///
/// The flags are independent; the only coupling is that adding to the cart
/// opens the drawer, which the caller does with [`ViewFlags::open_cart`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewFlags {
    pub menu_open: bool,
    pub cart_open: bool,
}

impl ViewFlags {
    pub const fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    pub const fn close_menu(&mut self) {
        self.menu_open = false;
    }

    pub const fn open_cart(&mut self) {
        self.cart_open = true;
    }

    pub const fn close_cart(&mut self) {
        self.cart_open = false;
    }
}
