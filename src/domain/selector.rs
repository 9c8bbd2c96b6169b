//! A small CSS selector subset: type, universal, `#id`, `.class`, `[attr]` and
//! `[attr=value]` parts, descendant (whitespace) and child (`>`) combinators,
//! and comma-separated selector lists.

use crate::domain::model::ElementId;
use crate::utils::error::{Result, SiteError};

/// Read access to an element tree, enough to evaluate a [`Selector`].
pub trait ElementTree {
    fn parent(&self, el: ElementId) -> Option<ElementId>;
    fn tag_name(&self, el: ElementId) -> &str;
    fn attribute_value(&self, el: ElementId, name: &str) -> Option<&str>;

    fn has_class_name(&self, el: ElementId, class: &str) -> bool {
        self.attribute_value(el, "class")
            .map(|list| list.split_ascii_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrCondition {
    Exists { key: String },
    Eq { key: String, value: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Compound {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attrs: Vec<AttrCondition>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    Descendant,
    Child,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Complex {
    compounds: Vec<Compound>,
    // combinators[i] joins compounds[i] and compounds[i + 1]
    combinators: Vec<Combinator>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    source: String,
    alternatives: Vec<Complex>,
}

impl Selector {
    pub fn parse(source: &str) -> Result<Self> {
        let mut alternatives = Vec::new();
        for part in source.split(',') {
            alternatives.push(Parser::new(source, part).complex()?);
        }
        Ok(Self {
            source: source.to_string(),
            alternatives,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn matches<T: ElementTree + ?Sized>(&self, tree: &T, el: ElementId) -> bool {
        self.alternatives
            .iter()
            .any(|complex| match_from(tree, complex, complex.compounds.len() - 1, el))
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.source)
    }
}

impl std::str::FromStr for Selector {
    type Err = SiteError;

    fn from_str(s: &str) -> Result<Self> {
        Selector::parse(s)
    }
}

fn match_from<T: ElementTree + ?Sized>(
    tree: &T,
    complex: &Complex,
    idx: usize,
    el: ElementId,
) -> bool {
    if !compound_matches(tree, &complex.compounds[idx], el) {
        return false;
    }
    if idx == 0 {
        return true;
    }
    match complex.combinators[idx - 1] {
        Combinator::Child => tree
            .parent(el)
            .map(|p| match_from(tree, complex, idx - 1, p))
            .unwrap_or(false),
        Combinator::Descendant => {
            let mut cursor = tree.parent(el);
            while let Some(ancestor) = cursor {
                if match_from(tree, complex, idx - 1, ancestor) {
                    return true;
                }
                cursor = tree.parent(ancestor);
            }
            false
        }
    }
}

fn compound_matches<T: ElementTree + ?Sized>(tree: &T, compound: &Compound, el: ElementId) -> bool {
    if let Some(tag) = &compound.tag {
        if !tree.tag_name(el).eq_ignore_ascii_case(tag) {
            return false;
        }
    }
    if let Some(id) = &compound.id {
        if tree.attribute_value(el, "id") != Some(id.as_str()) {
            return false;
        }
    }
    if !compound.classes.iter().all(|c| tree.has_class_name(el, c)) {
        return false;
    }
    compound.attrs.iter().all(|cond| match cond {
        AttrCondition::Exists { key } => tree.attribute_value(el, key).is_some(),
        AttrCondition::Eq { key, value } => tree.attribute_value(el, key) == Some(value.as_str()),
    })
}

struct Parser<'a> {
    source: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str, part: &str) -> Self {
        Self {
            source,
            chars: part.trim().chars().collect(),
            pos: 0,
        }
    }

    fn error(&self, reason: impl Into<String>) -> SiteError {
        SiteError::InvalidSelector {
            selector: self.source.to_string(),
            reason: reason.into(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn complex(&mut self) -> Result<Complex> {
        if self.chars.is_empty() {
            return Err(self.error("empty selector"));
        }
        let mut compounds = vec![self.compound()?];
        let mut combinators = Vec::new();
        loop {
            let had_space = self.skip_whitespace();
            match self.peek() {
                None => break,
                Some('>') => {
                    self.pos += 1;
                    self.skip_whitespace();
                    combinators.push(Combinator::Child);
                }
                Some(_) if had_space => combinators.push(Combinator::Descendant),
                Some(c) => return Err(self.error(format!("unexpected `{}`", c))),
            }
            compounds.push(self.compound()?);
        }
        Ok(Complex {
            compounds,
            combinators,
        })
    }

    fn compound(&mut self) -> Result<Compound> {
        let mut compound = Compound::default();
        let start = self.pos;

        match self.peek() {
            Some('*') => self.pos += 1,
            Some(c) if is_ident_char(c) => compound.tag = Some(self.ident()?.to_ascii_lowercase()),
            _ => {}
        }

        loop {
            match self.peek() {
                Some('#') => {
                    self.pos += 1;
                    compound.id = Some(self.ident()?);
                }
                Some('.') => {
                    self.pos += 1;
                    compound.classes.push(self.ident()?);
                }
                Some('[') => {
                    self.pos += 1;
                    compound.attrs.push(self.attribute()?);
                }
                _ => break,
            }
        }

        if self.pos == start {
            return Err(match self.peek() {
                Some(c) => self.error(format!("unexpected `{}`", c)),
                None => self.error("missing compound selector"),
            });
        }
        Ok(compound)
    }

    fn ident(&mut self) -> Result<String> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if is_ident_char(c)) {
            self.pos += 1;
        }
        if start == self.pos {
            return Err(self.error("expected identifier"));
        }
        Ok(self.chars[start..self.pos].iter().collect())
    }

    fn attribute(&mut self) -> Result<AttrCondition> {
        self.skip_whitespace();
        let key = self.ident()?;
        self.skip_whitespace();
        let cond = match self.peek() {
            Some(']') => AttrCondition::Exists { key },
            Some('=') => {
                self.pos += 1;
                self.skip_whitespace();
                let value = match self.peek() {
                    Some(q @ ('"' | '\'')) => self.quoted(q)?,
                    _ => self.ident()?,
                };
                self.skip_whitespace();
                AttrCondition::Eq { key, value }
            }
            _ => return Err(self.error("unterminated attribute selector")),
        };
        if self.peek() != Some(']') {
            return Err(self.error("unterminated attribute selector"));
        }
        self.pos += 1;
        Ok(cond)
    }

    fn quoted(&mut self, quote: char) -> Result<String> {
        self.pos += 1;
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c == quote {
                let value = self.chars[start..self.pos].iter().collect();
                self.pos += 1;
                return Ok(value);
            }
            self.pos += 1;
        }
        Err(self.error("unterminated string"))
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}
