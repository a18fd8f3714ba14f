//! Two-region layout: the file picker and the page display share one area.
//!
//! Exactly one region is active at a time. Switching swaps the two regions'
//! shares, so the newly shown region takes over whatever the other one had.

/// One of the two display regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Picker,
    Pages,
}

impl Region {
    pub const fn other(self) -> Self {
        match self {
            Self::Picker => Self::Pages,
            Self::Pages => Self::Picker,
        }
    }
}

/// Percentage of the shared area held by each region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionLayout {
    picker: u16,
    pages: u16,
}

impl Default for RegionLayout {
    fn default() -> Self {
        Self {
            picker: 0,
            pages: 100,
        }
    }
}

impl RegionLayout {
    /// Share of the area (0..=100) given to `region`.
    pub const fn share(&self, region: Region) -> u16 {
        match region {
            Region::Picker => self.picker,
            Region::Pages => self.pages,
        }
    }

    /// The region currently holding the area.
    pub const fn active(&self) -> Region {
        if self.picker > 0 {
            Region::Picker
        } else {
            Region::Pages
        }
    }

    pub const fn is_visible(&self, region: Region) -> bool {
        self.share(region) > 0
    }

    /// Make `region` the active one. Returns whether anything changed.
    pub fn show(&mut self, region: Region) -> bool {
        if self.share(region) > 0 {
            return false;
        }
        std::mem::swap(&mut self.picker, &mut self.pages);
        true
    }

    /// Switch to the region that is currently hidden.
    pub fn toggle(&mut self) -> Region {
        let next = self.active().other();
        self.show(next);
        next
    }
}
