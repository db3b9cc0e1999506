use pinyin::ToPinyin;

/// Search keys derived from a display name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchKeys {
    /// Toneless pinyin of every character, no separators.
    pub total: String,
    /// First letter of each character's pinyin.
    pub first: String,
}

/// Characters without a pinyin reading are copied unchanged into both keys.
pub fn derive_search_keys(name: &str) -> SearchKeys {
    let mut keys = SearchKeys::default();
    for (ch, reading) in name.chars().zip(name.to_pinyin()) {
        match reading {
            Some(pinyin) => {
                keys.total.push_str(pinyin.plain());
                keys.first.push_str(pinyin.first_letter());
            }
            None => {
                keys.total.push(ch);
                keys.first.push(ch);
            }
        }
    }
    keys
}
