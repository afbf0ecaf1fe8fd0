// src/noyau/rpn.rs
//
// Normalisation -> Shunting-yard -> RPN -> AST
// Objectif:
// - Normaliser la suite de Tok (multiplication implicite + parenthèses manquantes)
// - La convertir en RPN (postfix)
// - Puis reconstruire Expr (les alias sec/cosec/cosinln y sont dépliés)
//
// Règles:
// - Moins unaire : si '-' arrive quand on attend une valeur, il devient Tok::Neg
//   (préfixe, plus fort que * /, plus faible que ^ : -x^2 = -(x^2), 2^-x = 2^(-x))
// - Plus unaire : ignoré
// - Une fonction doit être suivie de '(' ; elle sort après sa parenthèse fermante.

use super::erreur::ErreurExpression;
use super::expr::{Expr, Fonction};
use super::jetons::{NomFonction, Tok};

fn precedence(t: &Tok) -> i32 {
    match t {
        Tok::Plus | Tok::Minus => 1,
        Tok::Star | Tok::Slash => 2,
        Tok::Neg => 3,
        Tok::Caret => 4,
        _ => 0,
    }
}

fn is_right_associative(t: &Tok) -> bool {
    matches!(t, Tok::Caret | Tok::Neg)
}

/// Le jeton peut terminer une valeur.
fn finit_valeur(t: &Tok) -> bool {
    matches!(t, Tok::Num(_) | Tok::X | Tok::Pi | Tok::RPar)
}

/// Le jeton peut commencer une valeur multipliée implicitement.
fn commence_valeur(t: &Tok) -> bool {
    matches!(t, Tok::X | Tok::Pi | Tok::Fonction(_) | Tok::LPar)
}

/// Multiplication implicite + équilibrage des parenthèses.
///
/// - `2x` -> `2*x`, `2(x+1)` -> `2*(x+1)`, `(x)(2)` -> `(x)*(2)`, `(x+1)2` -> `(x+1)*2`
/// - deux nombres accolés ne sont PAS multipliés (erreur plus loin)
/// - il manque des ')' en fin d'entrée : on les ajoute (déficit ouvrantes/fermantes)
/// - une ')' sans '(' est refusée
pub fn normaliser(tokens: &[Tok]) -> Result<Vec<Tok>, ErreurExpression> {
    let mut out: Vec<Tok> = Vec::with_capacity(tokens.len() + 4);
    let mut profondeur: usize = 0;

    for tok in tokens.iter().cloned() {
        if let Some(prev) = out.last() {
            let implicite = (finit_valeur(prev) && commence_valeur(&tok))
                || (matches!(prev, Tok::RPar) && matches!(tok, Tok::Num(_)));
            if implicite {
                out.push(Tok::Star);
            }
        }

        match tok {
            Tok::LPar => profondeur += 1,
            Tok::RPar => {
                profondeur = profondeur
                    .checked_sub(1)
                    .ok_or(ErreurExpression::ParentheseOrpheline)?;
            }
            _ => {}
        }

        out.push(tok);
    }

    out.extend(std::iter::repeat(Tok::RPar).take(profondeur));
    Ok(out)
}

/// Convertit une suite de jetons (normalisée) en RPN.
///
/// Exemple:
///   tokens: [Fonction(Sin), LPar, X, Slash, Num(2), RPar]
///   rpn:    [X, Num(2), Slash, Fonction(Sin)]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Tok>, ErreurExpression> {
    let mut out: Vec<Tok> = Vec::new();
    let mut ops: Vec<Tok> = Vec::new();

    // “valeur” = un atome ou une expression fermée.
    // Sert à détecter le moins unaire et les opérandes manquants.
    let mut prev_was_value = false;

    for (i, tok) in tokens.iter().cloned().enumerate() {
        match tok {
            Tok::Num(_) | Tok::X | Tok::Pi => {
                if prev_was_value {
                    return Err(ErreurExpression::MalFormee("deux valeurs accolées"));
                }
                out.push(tok);
                prev_was_value = true;
            }

            Tok::Fonction(nom) => {
                if !matches!(tokens.get(i + 1), Some(Tok::LPar)) {
                    return Err(ErreurExpression::FonctionSansParenthese(
                        nom.nom().to_string(),
                    ));
                }
                // fonction : on la garde sur la pile (elle sortira après son argument)
                ops.push(tok);
                prev_was_value = false;
            }

            Tok::LPar => {
                ops.push(tok);
                prev_was_value = false;
            }

            Tok::RPar => {
                if !prev_was_value {
                    return Err(ErreurExpression::MalFormee("parenthèses vides ou opérande manquant"));
                }

                // dépile jusqu’à '('
                let mut fermee = false;
                while let Some(top) = ops.pop() {
                    if matches!(top, Tok::LPar) {
                        fermee = true;
                        break;
                    }
                    out.push(top);
                }
                if !fermee {
                    return Err(ErreurExpression::ParentheseOrpheline);
                }

                // si une fonction est au sommet, on la sort aussi
                if let Some(Tok::Fonction(_)) = ops.last() {
                    if let Some(f) = ops.pop() {
                        out.push(f);
                    }
                }

                prev_was_value = true;
            }

            Tok::Minus | Tok::Plus if !prev_was_value => {
                // unaire : '+' ignoré, '-' devient Neg (préfixe : ne dépile rien)
                if matches!(tok, Tok::Minus) {
                    ops.push(Tok::Neg);
                }
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret | Tok::Neg => {
                if !prev_was_value {
                    return Err(ErreurExpression::MalFormee("opérateur sans opérande gauche"));
                }

                // dépile tant que:
                // - on n'est pas bloqué par '(' ou par une fonction
                // - et la précédence/associativité exige de sortir l'opérateur du haut
                while let Some(top) = ops.last() {
                    if matches!(top, Tok::LPar | Tok::Fonction(_)) {
                        break;
                    }

                    let p_top = precedence(top);
                    let p_tok = precedence(&tok);

                    let doit_pop = if is_right_associative(&tok) {
                        p_top > p_tok
                    } else {
                        p_top >= p_tok
                    };

                    if !doit_pop {
                        break;
                    }
                    if let Some(op) = ops.pop() {
                        out.push(op);
                    }
                }

                ops.push(tok);
                prev_was_value = false;
            }
        }
    }

    if !prev_was_value {
        return Err(ErreurExpression::MalFormee("opérande manquant en fin d'expression"));
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op, Tok::LPar) {
            return Err(ErreurExpression::MalFormee("parenthèses non fermées"));
        }
        out.push(op);
    }

    Ok(out)
}

/// Garde-fous : l'évaluation, l'affichage et la libération de l'arbre sont récursifs,
/// leur profondeur doit rester bornée quelle que soit la saisie.
pub const MAX_PROFONDEUR: usize = 512;
pub const MAX_NOEUDS: usize = 200_000;

/// Construit une Expr à partir d’une RPN.
///
/// Les alias sont dépliés ici :
/// - sec(u)     => 1/cos(u)
/// - cosec(u)   => 1/sin(u)
/// - cosinln(u) => ln(cos(u))
///
/// Refuse un arbre plus profond que `MAX_PROFONDEUR` ou une RPN de plus de `MAX_NOEUDS` jetons.
pub fn from_rpn(rpn: &[Tok]) -> Result<Expr, ErreurExpression> {
    if rpn.len() > MAX_NOEUDS {
        return Err(ErreurExpression::TropLongue { limite: MAX_NOEUDS });
    }

    let invalide = || ErreurExpression::MalFormee("pile RPN incohérente");
    // (sous-arbre, profondeur) : la profondeur est suivie sans parcourir l'arbre
    let mut st: Vec<(Expr, usize)> = Vec::new();

    for tok in rpn.iter().cloned() {
        let (e, profondeur) = match tok {
            Tok::Num(v) => (Expr::Nombre(v), 1),
            Tok::X => (Expr::X, 1),
            Tok::Pi => (Expr::Pi, 1),

            Tok::Neg => {
                let (a, p) = st.pop().ok_or_else(invalide)?;
                (Expr::Neg(Box::new(a)), p + 1)
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                let (b, pb) = st.pop().ok_or_else(invalide)?;
                let (a, pa) = st.pop().ok_or_else(invalide)?;
                let (a, b) = (Box::new(a), Box::new(b));

                let e = match tok {
                    Tok::Plus => Expr::Add(a, b),
                    Tok::Minus => Expr::Sub(a, b),
                    Tok::Star => Expr::Mul(a, b),
                    Tok::Slash => Expr::Div(a, b),
                    _ => Expr::Pow(a, b),
                };
                (e, pa.max(pb) + 1)
            }

            Tok::Fonction(nom) => {
                let (u, p) = st.pop().ok_or_else(invalide)?;
                // les alias ajoutent deux niveaux (1/cos(u), ln(cos(u)))
                (deplier(nom, u), p + 2)
            }

            Tok::LPar | Tok::RPar => {
                return Err(ErreurExpression::MalFormee("parenthèse inattendue en RPN"))
            }
        };

        if profondeur > MAX_PROFONDEUR {
            return Err(ErreurExpression::TropProfonde {
                limite: MAX_PROFONDEUR,
            });
        }
        st.push((e, profondeur));
    }

    match (st.pop(), st.is_empty()) {
        (Some((e, _)), true) => Ok(e),
        _ => Err(invalide()),
    }
}

fn deplier(nom: NomFonction, u: Expr) -> Expr {
    match nom {
        NomFonction::Sin => Expr::appel(Fonction::Sin, u),
        NomFonction::Cos => Expr::appel(Fonction::Cos, u),
        NomFonction::Tan => Expr::appel(Fonction::Tan, u),
        NomFonction::Sqrt => Expr::appel(Fonction::Sqrt, u),
        NomFonction::Log => Expr::appel(Fonction::Log10, u),
        NomFonction::Ln => Expr::appel(Fonction::Ln, u),
        NomFonction::Exp => Expr::appel(Fonction::Exp, u),
        NomFonction::Abs => Expr::appel(Fonction::Abs, u),
        NomFonction::Sec => Expr::inverse(Expr::appel(Fonction::Cos, u)),
        NomFonction::Cosec => Expr::inverse(Expr::appel(Fonction::Sin, u)),
        NomFonction::CosInLn => Expr::appel(Fonction::Ln, Expr::appel(Fonction::Cos, u)),
    }
}
