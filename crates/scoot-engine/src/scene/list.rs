use super::{DrawCmd, SortKey, ZIndex};

/// A single draw item: sort key + command.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub key: SortKey,
    pub cmd: DrawCmd,
}

/// Recorded draw stream for a frame.
///
/// Items are sorted in place the first time paint order is requested and
/// stay sorted until the next `push`. `SortKey` embeds the insertion index,
/// so items on the same z-layer keep their recording order.
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
    next_order: u32,
    sorted: bool,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears recorded items. Keeps allocated capacity for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
        self.next_order = 0;
        self.sorted = false;
    }

    /// Pushes a draw command with the given z-index.
    #[inline]
    pub fn push(&mut self, z: ZIndex, cmd: DrawCmd) {
        let key = SortKey::new(z, self.next_order);
        self.next_order = self.next_order.wrapping_add(1);
        self.items.push(DrawItem { key, cmd });
        self.sorted = false;
    }

    /// Iterates items in paint order (back-to-front).
    pub fn iter_in_paint_order(&mut self) -> impl Iterator<Item = &DrawItem> {
        if !self.sorted {
            self.items.sort_by_key(|item| item.key);
            self.sorted = true;
        }
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Rect;
    use crate::paint::Color;

    fn keys_in_paint_order(list: &mut DrawList) -> Vec<SortKey> {
        list.iter_in_paint_order().map(|i| i.key).collect()
    }

    #[test]
    fn equal_z_preserves_insertion_order() {
        let mut list = DrawList::new();
        list.push_solid_rect(ZIndex::new(0), Rect::new(0.0, 0.0, 1.0, 1.0), Color::black());
        list.push_solid_rect(ZIndex::new(0), Rect::new(1.0, 0.0, 1.0, 1.0), Color::white());

        let keys = keys_in_paint_order(&mut list);
        assert_eq!(keys[0].order, 0);
        assert_eq!(keys[1].order, 1);
    }

    #[test]
    fn lower_z_paints_first() {
        let mut list = DrawList::new();
        list.push_solid_rect(ZIndex::new(5), Rect::new(0.0, 0.0, 1.0, 1.0), Color::black());
        list.push_solid_rect(ZIndex::new(-1), Rect::new(1.0, 0.0, 1.0, 1.0), Color::white());

        let keys = keys_in_paint_order(&mut list);
        assert_eq!(keys[0].z, ZIndex::new(-1));
        assert_eq!(keys[1].z, ZIndex::new(5));
    }

    #[test]
    fn push_after_iteration_resorts() {
        let mut list = DrawList::new();
        list.push_solid_rect(ZIndex::new(2), Rect::new(0.0, 0.0, 1.0, 1.0), Color::black());
        let _ = keys_in_paint_order(&mut list);

        list.push_solid_rect(ZIndex::new(0), Rect::new(1.0, 0.0, 1.0, 1.0), Color::white());

        let keys = keys_in_paint_order(&mut list);
        assert_eq!(keys[0].z, ZIndex::new(0));
    }

    #[test]
    fn clear_resets_order_counter() {
        let mut list = DrawList::new();
        list.push_solid_rect(ZIndex::new(0), Rect::new(0.0, 0.0, 1.0, 1.0), Color::black());
        list.clear();
        list.push_solid_rect(ZIndex::new(0), Rect::new(0.0, 0.0, 1.0, 1.0), Color::black());

        let keys = keys_in_paint_order(&mut list);
        assert_eq!(keys[0].order, 0);
    }
}
