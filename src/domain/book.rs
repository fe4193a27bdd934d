use serde::{Deserialize, Serialize};

use super::Isbn;

/// 蔵書 - カタログに登録された1冊の書籍
///
/// 生成後は変更しない。タグは重複を除き、最初に現れた順序を保つ。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    isbn: Isbn,
    title: String,
    tags: Vec<String>,
}

impl Book {
    pub fn new<I, S>(isbn: Isbn, title: impl Into<String>, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique_tags: Vec<String> = Vec::new();
        for tag in tags {
            let tag = tag.into();
            if !unique_tags.contains(&tag) {
                unique_tags.push(tag);
            }
        }

        Self {
            isbn,
            title: title.into(),
            tags: unique_tags,
        }
    }

    pub fn isbn(&self) -> &Isbn {
        &self.isbn
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// すべてのタグを持つか（AND条件。空の場合は常に真）
    pub fn has_all_tags(&self, tags: &[String]) -> bool {
        tags.iter().all(|tag| self.has_tag(tag))
    }

    /// タイトルに部分文字列を含むか（大文字小文字を区別しない）
    pub fn title_contains(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(&needle.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean_code() -> Book {
        Book::new(
            Isbn::new("978-0132350884"),
            "Clean Code",
            ["java", "architecture"],
        )
    }

    #[test]
    fn test_book_tags_are_deduplicated_in_order() {
        let book = Book::new(Isbn::new("1"), "Dup", ["b", "a", "b", "c", "a"]);
        assert_eq!(book.tags(), ["b", "a", "c"]);
    }

    #[test]
    fn test_book_title_contains_is_case_insensitive() {
        let book = clean_code();
        assert!(book.title_contains("clean"));
        assert!(book.title_contains("CODE"));
        assert!(book.title_contains("n C"));
        assert!(!book.title_contains("java"));
    }

    #[test]
    fn test_book_has_all_tags_is_conjunctive() {
        let book = clean_code();
        assert!(book.has_all_tags(&[]));
        assert!(book.has_all_tags(&["java".to_string()]));
        assert!(book.has_all_tags(&["architecture".to_string(), "java".to_string()]));
        assert!(!book.has_all_tags(&["java".to_string(), "python".to_string()]));
    }

    #[test]
    fn test_book_tag_match_is_exact() {
        let book = clean_code();
        assert!(!book.has_tag("Java"));
        assert!(!book.has_tag("jav"));
    }
}
