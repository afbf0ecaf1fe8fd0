//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler l'analyseur et le moteur sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - invariant clé : une Expression acceptée s'évalue en un réel FINI ou échoue proprement

use std::time::{Duration, Instant};

use super::bissection::{parse_et_executer, ResultatBissection};
use super::erreur::ErreurBissection;
use super::eval::Expression;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
    fn choisir<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.pick(items.len() as u32) as usize]
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération (bornée) ------------------------ */

const FONCTIONS: [&str; 11] = [
    "sin", "cos", "tan", "sqrt", "log", "ln", "exp", "abs", "sec", "cosec", "cosinln",
];

fn gen_atom(rng: &mut Rng) -> String {
    match rng.pick(6) {
        0 | 1 => "x".to_string(),
        2 => "pi".to_string(),
        3 => format!("{}", rng.pick(10)),
        4 => format!("{}.{}", rng.pick(10), rng.pick(100)),
        _ => format!("{}x", rng.pick(9) + 1), // × implicite
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atom(rng);
    }

    match rng.pick(8) {
        0 => gen_atom(rng),
        1 => format!("({} + {})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        2 => format!("{} - {}", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        3 => format!("{}*{}", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        4 => format!("{}/({})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        5 => format!("({})^{}", gen_expr(rng, depth - 1), rng.pick(4)),
        6 => format!("-{}", gen_expr(rng, depth - 1)),
        _ => {
            let f = rng.choisir(&FONCTIONS);
            format!("{f}({})", gen_expr(rng, depth - 1))
        }
    }
}

/// Bruit : fragments valides et invalides recollés au hasard.
fn gen_bruit(rng: &mut Rng) -> String {
    const FRAGMENTS: [&str; 24] = [
        "x", "(", ")", "+", "-", "*", "/", "^", "2", ".", "3.5", "sin", "cosec", "cosinln", "sec",
        "log", "pi", "π", " ", "y", ";", "e", "Math", "√",
    ];
    let n = 1 + rng.pick(12);
    (0..n).map(|_| rng.choisir(&FRAGMENTS)).collect()
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_analyse_et_evaluation_finie() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xC0FFEE_u64);
    let xs = [-3.0, -0.5, 0.0, 0.25, 1.0, 2.0, 7.5];

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..200 {
        budget(t0, max);

        let texte = gen_expr(&mut rng, 4);
        let expr = Expression::analyser(&texte)
            .unwrap_or_else(|e| panic!("expression générée refusée: {texte:?} err={e}"));

        for x in xs {
            match expr.evaluer(x) {
                Ok(y) => {
                    assert!(y.is_finite(), "f({x}) = {y} pour {texte:?}");
                    seen_ok += 1;
                }
                Err(e) => {
                    assert_eq!(e.x, x);
                    seen_err += 1;
                }
            }
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 100, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_forme_normalisee_stable() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xBADC0DE_u64);

    for _ in 0..200 {
        budget(t0, max);

        let texte = gen_expr(&mut rng, 4);
        let e1 = Expression::analyser(&texte).unwrap_or_else(|e| panic!("{texte:?}: {e}"));
        let e2 = Expression::analyser(e1.texte())
            .unwrap_or_else(|e| panic!("forme normalisée refusée: {:?}: {e}", e1.texte()));
        assert_eq!(e1.arbre(), e2.arbre(), "entrée {texte:?}");
        assert_eq!(e1.texte(), e2.texte());
    }
}

#[test]
fn fuzz_safe_bruit_jamais_de_panique() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0x5EED_u64);
    let mut refusees = 0usize;

    for _ in 0..500 {
        budget(t0, max);

        let texte = gen_bruit(&mut rng);
        match Expression::analyser(&texte) {
            Ok(expr) => {
                // acceptée : évaluation finie ou erreur propre
                if let Ok(y) = expr.evaluer(0.75) {
                    assert!(y.is_finite());
                }
            }
            Err(e) => {
                assert!(!e.to_string().is_empty());
                refusees += 1;
            }
        }
    }

    assert!(refusees > 0, "le bruit devrait produire des refus");
}

fn check_invariants(r: &ResultatBissection) {
    let its = r.iterations();
    assert!(!its.is_empty() && its.len() <= 100);
    for w in its.windows(2) {
        assert_eq!(w[1].index, w[0].index + 1);
        assert!(w[1].largeur < w[0].largeur);
    }
}

#[test]
fn fuzz_safe_moteur() {
    let t0 = Instant::now();
    let max = Duration::from_millis(1500);

    let mut rng = Rng::new(0xB15EC7_u64);
    let mut seen_ok = 0usize;

    for _ in 0..150 {
        budget(t0, max);

        let texte = gen_expr(&mut rng, 3);
        let a = -(rng.pick(50) as f64) / 10.0;
        let b = a + 0.1 + rng.pick(60) as f64 / 10.0;
        let (a, b) = if rng.coin() { (a, b) } else { (b, a) };
        let tol = ["0.1", "0.001", "1e-6", "0"][rng.pick(4) as usize];

        match parse_et_executer(&texte, &a.to_string(), &b.to_string(), tol) {
            Ok(r) => {
                check_invariants(&r);
                seen_ok += 1;
            }
            Err(
                ErreurBissection::IntervalleInvalide { .. }
                | ErreurBissection::ToleranceInvalide { .. }
                | ErreurBissection::PasDeChangementDeSigne { .. }
                | ErreurBissection::Evaluation(_),
            ) => {}
            Err(autre) => panic!("erreur non attendue: {texte:?} [{a}, {b}] err={autre}"),
        }
    }

    assert!(seen_ok > 0, "aucune exécution réussie");
}
