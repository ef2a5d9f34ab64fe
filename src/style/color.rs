//! CSS color parsing
//!
//! Accepts the notations that reach the renderer from upstream styling:
//! hex (`#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`), `rgb()`/`rgba()` with
//! numeric or percentage channels, and a table of common named colors.

use logos::Logos;

use super::number::{fmt_float, fmt_sig3};

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r]+")]
enum Token {
    #[regex(r"#[0-9a-fA-F]+", |lex| lex.slice()[1..].to_string())]
    Hex(String),

    #[regex(r"[a-zA-Z][a-zA-Z-]*", |lex| lex.slice().to_ascii_lowercase())]
    Ident(String),

    #[regex(r"[+-]?([0-9]+\.?[0-9]*|\.[0-9]+)([eE][+-]?[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    Number(f64),

    #[token("%")]
    Percent,
    #[token("(")]
    ParenOpen,
    #[token(")")]
    ParenClose,
    #[token(",")]
    Comma,
    #[token("/")]
    Slash,
}

/// An sRGB color with channels in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    /// Alpha as written in the source notation; `None` when the notation had no alpha
    pub alpha: Option<f64>,
}

impl Color {
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self {
            r,
            g,
            b,
            alpha: None,
        }
    }

    pub fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self {
            r,
            g,
            b,
            alpha: Some(a),
        }
    }

    /// Parse a CSS color string, returning `None` for anything unrecognised
    pub fn parse(input: &str) -> Option<Color> {
        let tokens: Vec<Token> = Token::lexer(input).collect::<Result<_, _>>().ok()?;
        match tokens.as_slice() {
            [Token::Hex(hex)] => from_hex(hex),
            [Token::Ident(name)] => named(name),
            [Token::Ident(func), Token::ParenOpen, args @ .., Token::ParenClose]
                if func == "rgb" || func == "rgba" =>
            {
                from_components(args)
            }
            _ => None,
        }
    }

    /// Effective opacity, `1.0` when the notation carried no alpha
    pub fn opacity(&self) -> f64 {
        self.alpha.unwrap_or(1.0)
    }

    /// Opaque percentage notation, e.g. `rgb(90.6%,54.1%,76.5%)`
    pub fn to_rgb_percent(&self) -> String {
        format!(
            "rgb({}%,{}%,{}%)",
            fmt_sig3(self.r * 100.0),
            fmt_sig3(self.g * 100.0),
            fmt_sig3(self.b * 100.0)
        )
    }

    /// Opacity as a decimal string that always carries a fraction (`1.0`, `0.5`)
    pub fn opacity_string(&self) -> String {
        fmt_float(self.opacity())
    }
}

fn from_hex(hex: &str) -> Option<Color> {
    let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
    let pair = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    let channel = |v: u8| f64::from(v) / 255.0;

    let (r, g, b, a) = match hex.len() {
        3 => (digit(0)?, digit(1)?, digit(2)?, None),
        4 => (digit(0)?, digit(1)?, digit(2)?, Some(digit(3)?)),
        6 => (pair(0)?, pair(2)?, pair(4)?, None),
        8 => (pair(0)?, pair(2)?, pair(4)?, Some(pair(6)?)),
        _ => return None,
    };
    Some(Color {
        r: channel(r),
        g: channel(g),
        b: channel(b),
        alpha: a.map(channel),
    })
}

/// Parse `r, g, b [, a]` (commas or whitespace, `/` before alpha)
fn from_components(args: &[Token]) -> Option<Color> {
    let mut values: Vec<(f64, bool)> = Vec::with_capacity(4);
    let mut iter = args.iter().peekable();
    while let Some(token) = iter.next() {
        match token {
            Token::Number(n) => {
                let percent = matches!(iter.peek(), Some(Token::Percent));
                if percent {
                    iter.next();
                }
                values.push((*n, percent));
            }
            Token::Comma | Token::Slash => {}
            _ => return None,
        }
    }

    let channel = |(v, percent): (f64, bool)| {
        let v = if percent { v / 100.0 } else { v / 255.0 };
        v.clamp(0.0, 1.0)
    };
    let alpha = |(v, percent): (f64, bool)| {
        let v = if percent { v / 100.0 } else { v };
        v.clamp(0.0, 1.0)
    };

    match values.as_slice() {
        [r, g, b] => Some(Color::rgb(channel(*r), channel(*g), channel(*b))),
        [r, g, b, a] => Some(Color::rgba(
            channel(*r),
            channel(*g),
            channel(*b),
            alpha(*a),
        )),
        _ => None,
    }
}

fn named(name: &str) -> Option<Color> {
    let hex = match name {
        "black" => "000000",
        "white" => "ffffff",
        "red" => "ff0000",
        "lime" => "00ff00",
        "green" => "008000",
        "blue" => "0000ff",
        "yellow" => "ffff00",
        "cyan" | "aqua" => "00ffff",
        "magenta" | "fuchsia" => "ff00ff",
        "gray" | "grey" => "808080",
        "darkgray" | "darkgrey" => "a9a9a9",
        "lightgray" | "lightgrey" => "d3d3d3",
        "silver" => "c0c0c0",
        "maroon" => "800000",
        "olive" => "808000",
        "navy" => "000080",
        "teal" => "008080",
        "purple" => "800080",
        "orange" => "ffa500",
        "pink" => "ffc0cb",
        "brown" => "a52a2a",
        "steelblue" => "4682b4",
        "transparent" => "00000000",
        _ => return None,
    };
    from_hex(hex)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rgba_percent() {
        let c = Color::parse("rgba(50%,50%,50%,0.5)").unwrap();
        assert_eq!(c, Color::rgba(0.5, 0.5, 0.5, 0.5));
        assert_eq!(c.to_rgb_percent(), "rgb(50%,50%,50%)");
        assert_eq!(c.opacity_string(), "0.5");
    }

    #[test]
    fn test_parse_rgb_numeric() {
        let c = Color::parse("rgb(255, 0, 0)").unwrap();
        assert_eq!(c, Color::rgb(1.0, 0.0, 0.0));
        assert_eq!(c.opacity_string(), "1.0");
    }

    #[test]
    fn test_parse_rgba_percent_alpha() {
        let c = Color::parse("rgba(40%,76.1%,64.7%,100%)").unwrap();
        assert_eq!(c.alpha, Some(1.0));
        assert_eq!(c.to_rgb_percent(), "rgb(40%,76.1%,64.7%)");
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(Color::parse("#ff0000"), Some(Color::rgb(1.0, 0.0, 0.0)));
        assert_eq!(Color::parse("#fff"), Some(Color::rgb(1.0, 1.0, 1.0)));
        let c = Color::parse("#e78ac3").unwrap();
        assert_eq!(c.to_rgb_percent(), "rgb(90.6%,54.1%,76.5%)");
        let c = Color::parse("#00000080").unwrap();
        assert!((c.opacity() - 128.0 / 255.0).abs() < 1e-12);
    }

    #[test]
    fn test_parse_named() {
        assert_eq!(Color::parse("red"), Some(Color::rgb(1.0, 0.0, 0.0)));
        assert_eq!(Color::parse("Navy"), Color::parse("#000080"));
        assert_eq!(Color::parse("transparent").unwrap().opacity(), 0.0);
    }

    #[test]
    fn test_parse_failures() {
        assert_eq!(Color::parse("notacolor"), None);
        assert_eq!(Color::parse("#12345"), None);
        assert_eq!(Color::parse("rgb(1,2)"), None);
        assert_eq!(Color::parse("hsl(10, 20%, 30%)"), None);
        assert_eq!(Color::parse(""), None);
    }
}
