// src/noyau/jetons.rs
//
// Tokenisation en UNE passe.
// Un identifiant est lu en entier ([a-zA-Z_][a-zA-Z0-9_]*) puis cherché tel quel
// dans la liste blanche : "cosec" ne peut jamais devenir "cos" + "ec".

use super::erreur::ErreurExpression;

/// Noms de fonctions acceptés (alias compris).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NomFonction {
    Sin,
    Cos,
    Tan,
    Sqrt,
    Log, // base 10
    Ln,
    Exp,
    Abs,
    Sec,     // 1/cos
    Cosec,   // 1/sin (cosec, csc)
    CosInLn, // ln(cos(..))
}

impl NomFonction {
    /// Recherche d'un mot complet (déjà en minuscules).
    pub fn depuis_mot(mot: &str) -> Option<Self> {
        let nom = match mot {
            "sin" => NomFonction::Sin,
            "cos" => NomFonction::Cos,
            "tan" => NomFonction::Tan,
            "sqrt" => NomFonction::Sqrt,
            "log" => NomFonction::Log,
            "ln" => NomFonction::Ln,
            "exp" => NomFonction::Exp,
            "abs" => NomFonction::Abs,
            "sec" => NomFonction::Sec,
            "cosec" | "csc" => NomFonction::Cosec,
            "cosinln" => NomFonction::CosInLn,
            _ => return None,
        };
        Some(nom)
    }

    pub fn nom(self) -> &'static str {
        match self {
            NomFonction::Sin => "sin",
            NomFonction::Cos => "cos",
            NomFonction::Tan => "tan",
            NomFonction::Sqrt => "sqrt",
            NomFonction::Log => "log",
            NomFonction::Ln => "ln",
            NomFonction::Exp => "exp",
            NomFonction::Abs => "abs",
            NomFonction::Sec => "sec",
            NomFonction::Cosec => "cosec",
            NomFonction::CosInLn => "cosinln",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(f64),
    X,
    Pi,
    Fonction(NomFonction),

    Plus,
    Minus,
    Star,
    Slash,
    Caret, // ^

    // Moins unaire : n'est jamais produit par tokenize(), seulement par to_rpn().
    Neg,

    LPar,
    RPar,
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - nombres décimaux (ex: 12, 1.5, .5)
/// - opérateurs + - * / ^
/// - parenthèses ( )
/// - x (variable liée), π ou pi
/// - fonctions de la liste blanche (insensible à la casse)
/// - √ (équivaut à sqrt)
pub fn tokenize(s: &str) -> Result<Vec<Tok>, ErreurExpression> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        let simple = match c {
            '(' => Some(Tok::LPar),
            ')' => Some(Tok::RPar),
            '+' => Some(Tok::Plus),
            '-' | '−' => Some(Tok::Minus),
            '*' | '×' => Some(Tok::Star),
            '/' => Some(Tok::Slash),
            '^' => Some(Tok::Caret),
            'π' => Some(Tok::Pi),
            '√' => Some(Tok::Fonction(NomFonction::Sqrt)),
            _ => None,
        };
        if let Some(t) = simple {
            out.push(t);
            i += 1;
            continue;
        }

        // Identifiants ASCII : [a-zA-Z_][a-zA-Z0-9_]*
        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let mot: String = chars[start..i].iter().collect::<String>().to_lowercase();

            let tok = match mot.as_str() {
                "x" => Tok::X,
                "pi" => Tok::Pi,
                _ => match NomFonction::depuis_mot(&mot) {
                    Some(f) => Tok::Fonction(f),
                    None => return Err(ErreurExpression::IdentifiantInconnu(mot)),
                },
            };
            out.push(tok);
            continue;
        }

        // Nombre décimal : chiffres et points lus d'un bloc, puis validés
        if c.is_ascii_digit() || c == '.' {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            let brut: String = chars[start..i].iter().collect();
            let v = brut
                .parse::<f64>()
                .map_err(|_| ErreurExpression::NombreInvalide(brut.clone()))?;
            out.push(Tok::Num(v));
            continue;
        }

        return Err(ErreurExpression::CaractereInattendu(c));
    }

    Ok(out)
}

/// Format utilitaire (démarche) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = Vec::with_capacity(tokens.len());
    for t in tokens {
        let s = match t {
            Tok::Num(v) => format!("{v}"),
            Tok::X => "x".to_string(),
            Tok::Pi => "π".to_string(),
            Tok::Fonction(f) => f.nom().to_string(),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::Caret => "^".to_string(),
            Tok::Neg => "neg".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
