//! View capability system
//!
//! Views declare what they support so the keyboard middleware can route keys
//! without knowing about specific views.

use bitflags::bitflags;

bitflags! {
    /// Capabilities that a view can declare
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ViewCapabilities: u32 {
        /// View can scroll vertically
        const SCROLL_VERTICAL = 1 << 0;

        /// View supports vim-style navigation keybindings (j, k, g, G)
        const VIM_NAVIGATION_BINDINGS = 1 << 1;

        /// View can move a cursor between items
        const ITEM_NAVIGATION = 1 << 2;

        /// View currently captures typed characters
        const TEXT_INPUT = 1 << 3;
    }
}

impl ViewCapabilities {
    pub fn accepts_text_input(self) -> bool {
        self.contains(Self::TEXT_INPUT)
    }

    /// Check if view supports vim-style navigation (j/k/g/G)
    pub fn supports_vim_navigation(self) -> bool {
        self.contains(Self::VIM_NAVIGATION_BINDINGS)
    }

    pub fn supports_navigation(self) -> bool {
        self.intersects(Self::SCROLL_VERTICAL | Self::ITEM_NAVIGATION)
    }
}

impl Default for ViewCapabilities {
    fn default() -> Self {
        Self::empty()
    }
}
