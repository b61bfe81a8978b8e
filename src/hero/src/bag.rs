// src/hero/src/bag.rs
use items::Item;

/// 英雄背包：有序的物品多重集合，移除时按栈顺序（后进先出）
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Bag {
    items: Vec<Item>,
}

impl Bag {
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加物品到末尾
    pub fn add(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Remove the most recently added instance of `item`.
    pub fn take(&mut self, item: Item) -> Option<Item> {
        let idx = self.items.iter().rposition(|i| *i == item)?;
        Some(self.items.remove(idx))
    }

    pub fn count(&self, item: Item) -> usize {
        self.items.iter().filter(|i| **i == item).count()
    }

    /// Distinct items with their counts, in first-acquired order.
    pub fn summary(&self) -> Vec<(Item, usize)> {
        let mut out: Vec<(Item, usize)> = Vec::new();
        for item in &self.items {
            match out.iter_mut().find(|(i, _)| i == item) {
                Some((_, count)) => *count += 1,
                None => out.push((*item, 1)),
            }
        }
        out
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_take() {
        let mut bag = Bag::new();
        assert!(bag.take(Item::HealingPotion).is_none());

        bag.add(Item::HealingPotion);
        bag.add(Item::HealingPotion);
        assert_eq!(bag.count(Item::HealingPotion), 2);
        assert_eq!(bag.summary(), vec![(Item::HealingPotion, 2)]);

        assert_eq!(bag.take(Item::HealingPotion), Some(Item::HealingPotion));
        assert_eq!(bag.len(), 1);
        assert_eq!(bag.take(Item::HealingPotion), Some(Item::HealingPotion));
        assert!(bag.is_empty());
        assert!(bag.summary().is_empty());
    }
}
