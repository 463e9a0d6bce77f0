// End-to-end: gabarito JSON on disk → reconcile → rendered report

use chrono::NaiveDate;
use gabarito_check::{
    render, Gabarito, LoadOptions, Outcome, ReconciliationEngine, Reason, ReportFormat,
};
use std::fs;
use std::path::PathBuf;

const GABARITO_JSON: &str = r#"{
    "atividades": [
        { "nome": "Reunião Magna", "mes_obrigatorio": "03" },
        { "nome": "Comissões Permanentes", "validacao": true, "prazo": "31/08/2025" },
        { "nome": "Dia dos Pais", "mes_obrigatorio": "08", "validacao": true },
        { "nome": "Campanha do Agasalho" }
    ]
}"#;

fn write_gabarito(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("gabarito-check-{}-{}.json", name, std::process::id()));
    fs::write(&path, GABARITO_JSON).unwrap();
    path
}

#[test]
fn test_full_pipeline_from_file() {
    let path = write_gabarito("pipeline");
    let gabarito = Gabarito::from_file(&path, &LoadOptions::new()).unwrap();
    fs::remove_file(&path).ok();

    let checklist = "\
        Reuniao Magna\n\
        20/03/2025\n\
        Comissoes Permanetes\n\
        02/09/2025\n\
        Dia dos Pais\n\
        21/12/2025\n\
        Reunião Magna\n\
        21/03/2025\n\
        Festa Junina\n\
        15/06/2025\n\
        Campanha do Agasalho\n";

    let report = ReconciliationEngine::new().reconcile(gabarito.entries(), "Estrela do Norte", checklist);

    assert_eq!(report.title, "Capítulo: Estrela do Norte");
    assert_eq!(report.discarded_lines, 1);
    assert_eq!(
        report.outcomes,
        vec![
            Outcome::ok("Reunião Magna", "20/03/2025"),
            Outcome::failed(
                "Comissões Permanentes",
                "Comissoes Permanetes",
                vec![Reason::PastDeadline {
                    deadline: NaiveDate::from_ymd_opt(2025, 8, 31).unwrap()
                }],
            ),
            Outcome::failed(
                "Dia dos Pais",
                "Dia dos Pais",
                vec![
                    Reason::WrongMonth { required_month: 8 },
                    Reason::PastDeadline {
                        deadline: NaiveDate::from_ymd_opt(2025, 12, 20).unwrap()
                    },
                ],
            ),
            Outcome::duplicate("Reunião Magna", "Reunião Magna"),
            Outcome::not_found("Festa Junina"),
            Outcome::missing("Campanha do Agasalho"),
        ]
    );

    let text = render(&report, ReportFormat::Text).unwrap();
    assert!(text.starts_with("Capítulo: Estrela do Norte\n\n[OK] Reunião Magna (20/03/2025) está correta.\n"));
    assert!(text.contains("[ERRO] Dia dos Pais: mês obrigatório 08 e prazo máximo 20/12/2025."));
    assert!(text.ends_with("[ERRO] Campanha do Agasalho: não foi informada."));

    let summary = report.summary();
    assert_eq!(summary.ok, 1);
    assert_eq!(summary.errors, 5);
}

#[test]
fn test_compliant_checklist() {
    let path = write_gabarito("compliant");
    let gabarito = Gabarito::from_file(&path, &LoadOptions::new()).unwrap();
    fs::remove_file(&path).ok();

    let checklist = "\
        reunião magna\n10/03/2025\n\
        COMISSÕES PERMANENTES\n31/08/2025\n\
        Dia dos Pais\n10/08/2025\n\
        Campanha do Agasalho\n01/07/2025";

    let report = ReconciliationEngine::new().reconcile(gabarito.entries(), "Capítulo Alvorada", checklist);

    assert_eq!(report.title, "Capítulo Alvorada");
    assert!(report.is_compliant(), "unexpected errors: {:?}", report.outcomes);
    assert_eq!(report.outcomes.len(), 4);
}
