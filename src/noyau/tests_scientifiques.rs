//! Tests scientifiques (campagne) : scénarios de référence + invariants du moteur.
//!
//! But : vérifier les résultats connus sans faire chauffer la machine.
//! - scénarios concrets (cubique, √2, π, intervalle inversé, pas de racine)
//! - propriétés de la boucle (demi-largeurs exactes, index croissants, idempotence)
//! - stress borné (budget temps global)

use std::time::{Duration, Instant};

use super::bissection::{executer, parse_et_executer, Arret, ResultatBissection};
use super::erreur::{ErreurBissection, ErreurExpression};
use super::eval::Expression;
use super::format::{exporter_csv, ENTETES};

fn run_ok(f: &str, a: &str, b: &str, tol: &str) -> ResultatBissection {
    parse_et_executer(f, a, b, tol).unwrap_or_else(|e| panic!("f={f:?} [{a}, {b}] tol={tol} err={e}"))
}

fn assert_proche(v: f64, attendu: f64, eps: f64) {
    assert!(
        (v - attendu).abs() < eps,
        "valeur {v} trop loin de {attendu} (eps = {eps})"
    );
}

/// Budget global anti-gel (scientifique + safe).
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/// Invariants structurels d'une exécution terminée.
fn assert_invariants(r: &ResultatBissection) {
    let its = r.iterations();
    assert!(!its.is_empty() && its.len() <= 100);

    for (k, it) in its.iter().enumerate() {
        assert_eq!(it.index, k + 1, "index 1-based strictement croissants");
        assert_eq!(it.c, (it.a + it.b) / 2.0);
        assert_eq!(it.largeur, it.b - it.a);
        assert_eq!(it.tolerance_atteinte, it.largeur < r.tolerance());
    }

    // chaque pas non terminal divise exactement la largeur par deux
    for w in its.windows(2) {
        let (avant, apres) = (w[0].largeur, w[1].largeur);
        assert!(
            (apres - avant / 2.0).abs() <= 4.0 * f64::EPSILON * avant,
            "largeur {apres} au lieu de {avant}/2"
        );
    }

    assert_eq!(r.racine(), its[its.len() - 1].c);
}

/* ------------------------ Scénarios de référence ------------------------ */

#[test]
fn sci_cubique() {
    let r = run_ok("x^3 - x - 2", "1", "2", "0.001");
    assert_invariants(&r);

    let premier = r.iterations()[0];
    assert_eq!((premier.a, premier.b, premier.c), (1.0, 2.0, 1.5));
    assert!(r.iterations().len() <= 15);
    assert_proche(r.racine(), 1.521_184, 1e-3);
}

#[test]
fn sci_racine_de_deux() {
    let r = run_ok("x^2 - 2", "0", "2", "0.0001");
    assert_invariants(&r);

    let premier = r.iterations()[0];
    assert_eq!((premier.fa, premier.fb), (-2.0, 2.0));
    assert_proche(r.racine(), std::f64::consts::SQRT_2, 1e-4);
    assert_eq!(r.arret(), Arret::ToleranceAtteinte);
}

#[test]
fn sci_pi_par_sinus() {
    let r = run_ok("sin(x)", "3", "4", "0.001");
    assert_invariants(&r);
    assert_proche(r.racine(), std::f64::consts::PI, 1e-3);
}

#[test]
fn sci_intervalle_inverse() {
    assert_eq!(
        parse_et_executer("x^3 - x - 2", "2", "1", "0.001"),
        Err(ErreurBissection::IntervalleInvalide { a: 2.0, b: 1.0 })
    );
}

#[test]
fn sci_jamais_de_changement_de_signe() {
    for (a, b) in [("-10", "10"), ("0", "1"), ("-0.5", "0.5"), ("-1000", "3")] {
        assert!(matches!(
            parse_et_executer("x^2 + 1", a, b, "0.001"),
            Err(ErreurBissection::PasDeChangementDeSigne { .. })
        ));
    }
}

#[test]
fn sci_fonctions_composees() {
    // cos(x) = x  <=>  cos(x) - x = 0, racine ≈ 0.739085
    let r = run_ok("cos(x) - x", "0", "1", "1e-6");
    assert_invariants(&r);
    assert_proche(r.racine(), 0.739_085_133, 1e-6);

    // e^x = 3 via exp, racine ln(3)
    let r = run_ok("exp(x) - 3", "0", "2", "1e-6");
    assert_proche(r.racine(), 3f64.ln(), 1e-6);

    // log base 10 : log(x) = 1 en x = 10
    let r = run_ok("log(x) - 1", "5", "20", "1e-6");
    assert_proche(r.racine(), 10.0, 1e-5);

    // sec(x) = 2 en x = π/3
    let r = run_ok("sec(x) - 2", "0.5", "1.5", "1e-6");
    assert_proche(r.racine(), std::f64::consts::FRAC_PI_3, 1e-6);
}

#[test]
fn sci_multiplication_implicite_dans_un_calcul() {
    let r1 = run_ok("2x^2 - 1", "0", "1", "1e-6");
    let r2 = run_ok("2*x^2 - 1", "0", "1", "1e-6");
    assert_eq!(r1.iterations(), r2.iterations());
    assert_proche(r1.racine(), std::f64::consts::FRAC_1_SQRT_2, 1e-6);
}

#[test]
fn sci_idempotence() {
    let r1 = run_ok("x^3 - x - 2", "1", "2", "0.001");
    let r2 = run_ok("x^3 - x - 2", "1", "2", "0.001");
    let bits = |r: &ResultatBissection| -> Vec<[u64; 7]> {
        r.iterations()
            .iter()
            .map(|it| {
                [it.a, it.b, it.c, it.fa, it.fb, it.fc, it.largeur].map(f64::to_bits)
            })
            .collect()
    };
    assert_eq!(bits(&r1), bits(&r2));
    assert_eq!(r1.racine().to_bits(), r2.racine().to_bits());
}

#[test]
fn sci_executions_independantes() {
    // deux expressions, exécutions entrelacées : aucun état partagé
    let f = Expression::analyser("x^2 - 2").unwrap();
    let g = Expression::analyser("x^3 - x - 2").unwrap();
    let r_f1 = executer(&f, 0.0, 2.0, 1e-4).unwrap();
    let r_g = executer(&g, 1.0, 2.0, 1e-3).unwrap();
    let r_f2 = executer(&f, 0.0, 2.0, 1e-4).unwrap();
    assert_eq!(r_f1, r_f2);
    assert_ne!(r_f1.racine(), r_g.racine());
}

#[test]
fn sci_executions_concurrentes() {
    let textes = ["x^2 - 2", "x^3 - x - 2", "sin(x)", "cos(x) - x"];
    let bornes = [(0.0, 2.0), (1.0, 2.0), (3.0, 4.0), (0.0, 1.0)];

    let sequentiels: Vec<ResultatBissection> = textes
        .iter()
        .zip(bornes)
        .map(|(t, (a, b))| executer(&Expression::analyser(t).unwrap(), a, b, 1e-6).unwrap())
        .collect();

    let paralleles: Vec<ResultatBissection> = std::thread::scope(|s| {
        let handles: Vec<_> = textes
            .iter()
            .zip(bornes)
            .map(|(t, (a, b))| {
                s.spawn(move || executer(&Expression::analyser(t).unwrap(), a, b, 1e-6).unwrap())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(sequentiels, paralleles);
}

#[test]
fn sci_csv_complet() {
    let r = run_ok("x^3 - x - 2", "1", "2", "0.001");
    let csv = exporter_csv(&r, 6);
    let lignes: Vec<&str> = csv.lines().collect();

    assert_eq!(lignes[0], ENTETES.join(","));
    assert_eq!(lignes[0], "Iteration,a,b,c,f(a),f(b),f(c),b-a,ToleranceMet");
    assert_eq!(lignes.len(), r.iterations().len() + 1);
    assert_eq!(
        lignes[1],
        "1,1.000000,2.000000,1.500000,-2.000000,4.000000,-0.125000,1.000000,FALSE"
    );
    assert!(lignes[lignes.len() - 1].ends_with(",TRUE"));
}

/* ------------------------ Stress contrôlé (sans brûler) ------------------------ */

#[test]
fn sci_stress_expression_longue() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    // 80 termes : x - 1/80 répété, racine x = 1/80
    let mut texte = String::new();
    for k in 0..80 {
        if k > 0 {
            texte.push_str(" + ");
        }
        texte.push_str("(x - 1/80)");
        budget(t0, max);
    }

    let r = run_ok(&texte, "-1", "1", "1e-9");
    budget(t0, max);
    assert_proche(r.racine(), 1.0 / 80.0, 1e-8);
}

#[test]
fn sci_stress_imbrication() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    // abs(abs(...abs(x - 0.3)...)) - 0.1 : 60 niveaux
    let mut texte = "x - 0.3".to_string();
    for _ in 0..60 {
        texte = format!("abs({texte})");
        budget(t0, max);
    }
    let texte = format!("{texte} - 0.1");

    let r = run_ok(&texte, "0.3", "1", "1e-9");
    budget(t0, max);
    assert_proche(r.racine(), 0.4, 1e-8);
}

#[test]
fn sci_stress_imbrication_excessive() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    // saisie collée démesurée : refus typé, le processus continue
    for texte in [
        format!("{}x", "-".repeat(20_000)),
        format!("{}x - 1", "sqrt(".repeat(10_000)),
        format!("{}x", "2^".repeat(10_000)),
    ] {
        let err = parse_et_executer(&texte, "0", "2", "0.001").unwrap_err();
        budget(t0, max);
        assert!(
            matches!(
                err,
                ErreurBissection::Expression(ErreurExpression::TropProfonde { .. })
            ),
            "erreur inattendue: {err}"
        );
    }
}
