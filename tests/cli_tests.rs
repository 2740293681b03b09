use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::Sandbox;

const CSV: &str = "telefone,nome,valor,vencimento,desconto
(11) 99999-8888, João Silva, 89.90, 15/02, 10.00
11988887777,Maria Souza,abc,20/03,0
,Sem Telefone,5,01/01,0
";

#[test]
fn test_init_creates_database() {
    let sb = Sandbox::new();

    sb.db_cmd()
        .args(["--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    assert!(std::path::Path::new(&sb.db_path).exists());
}

#[test]
fn test_init_writes_config_file() {
    let sb = Sandbox::new();

    sb.db_cmd().arg("init").assert().success();

    let conf = sb.home.path().join(".debtpix").join("debtpix.conf");
    let content = std::fs::read_to_string(conf).expect("config written");
    assert!(content.contains("database:"));
    assert!(content.contains("0.0.0.0:3000"));

    sb.cmd()
        .args(["config", "--check"])
        .assert()
        .success()
        .stdout(contains("complete"));
}

#[test]
fn test_import_then_list() {
    let sb = Sandbox::new();
    sb.init();
    let csv = sb.file("clientes.csv", CSV);

    sb.db_cmd()
        .args(["import", csv.to_str().unwrap()])
        .assert()
        .success()
        .stdout(contains("2 debtor(s) imported"));

    sb.db_cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(contains("(11) 99999-8888"))
        .stdout(contains("João Silva"))
        .stdout(contains("79.90"))
        .stdout(contains("Maria Souza"))
        .stdout(contains("Sem Telefone").not());
}

#[test]
fn test_import_replaces_previous_list() {
    let sb = Sandbox::new();
    sb.init();
    let first = sb.file("a.csv", CSV);
    let second = sb.file("b.txt", "11977776666, Carlos, 50, 01/05, 0\n");

    sb.db_cmd()
        .args(["import", first.to_str().unwrap()])
        .assert()
        .success();
    sb.db_cmd()
        .args(["import", "--no-header", second.to_str().unwrap()])
        .assert()
        .success();

    sb.db_cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(contains("Carlos"))
        .stdout(contains("João Silva").not());
}

#[test]
fn test_del_with_confirmation_declined() {
    let sb = Sandbox::new();
    sb.init();
    let csv = sb.file("a.csv", CSV);
    sb.db_cmd()
        .args(["import", csv.to_str().unwrap()])
        .assert()
        .success();

    sb.db_cmd()
        .args(["del", "11999998888"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("cancelled"));

    sb.db_cmd()
        .arg("list")
        .assert()
        .stdout(contains("João Silva"));
}

#[test]
fn test_del_formatted_phone() {
    let sb = Sandbox::new();
    sb.init();
    let csv = sb.file("a.csv", CSV);
    sb.db_cmd()
        .args(["import", csv.to_str().unwrap()])
        .assert()
        .success();

    sb.db_cmd()
        .args(["del", "--yes", "(11) 99999-8888"])
        .assert()
        .success()
        .stdout(contains("has been deleted"));

    sb.db_cmd()
        .arg("list")
        .assert()
        .stdout(contains("João Silva").not())
        .stdout(contains("Maria Souza"));
}

#[test]
fn test_reset_and_pix() {
    let sb = Sandbox::new();
    sb.init();
    let csv = sb.file("a.csv", CSV);
    sb.db_cmd()
        .args(["import", csv.to_str().unwrap()])
        .assert()
        .success();

    sb.db_cmd()
        .args(["pix", "--key", "cobranca@claro.com"])
        .assert()
        .success();
    sb.db_cmd()
        .arg("pix")
        .assert()
        .success()
        .stdout(contains("cobranca@claro.com"));

    sb.db_cmd()
        .args(["reset"])
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(contains("System reset"));

    sb.db_cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(contains("No debtors"));
    sb.db_cmd()
        .arg("pix")
        .assert()
        .success()
        .stdout(contains("cobranca@claro.com").not());
}

#[test]
fn test_pix_qr_file_is_stored_as_data_uri() {
    let sb = Sandbox::new();
    sb.init();
    let img = sb.file("qr.png", "\u{89}PNG fake");

    sb.db_cmd()
        .args(["pix", "--qr-file", img.to_str().unwrap()])
        .assert()
        .success();

    let conn = rusqlite::Connection::open(&sb.db_path).unwrap();
    let qr: String = conn
        .query_row("SELECT value FROM config WHERE key = 'qr_code'", [], |r| {
            r.get(0)
        })
        .unwrap();
    assert!(qr.starts_with("data:image/png;base64,"));
}

#[test]
fn test_db_info() {
    let sb = Sandbox::new();
    sb.init();

    sb.db_cmd()
        .args(["db", "--info", "--check"])
        .assert()
        .success()
        .stdout(contains("Debtors:"))
        .stdout(contains("Integrity check passed"));
}

#[test]
fn test_hash_password() {
    let sb = Sandbox::new();
    sb.cmd()
        .args(["hash-password", "abc"])
        .assert()
        .success()
        .stdout(contains(
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad",
        ));
}

#[test]
fn test_import_missing_file_fails() {
    let sb = Sandbox::new();
    sb.init();

    sb.db_cmd()
        .args(["import", "/definitely/not/here.csv"])
        .assert()
        .failure()
        .stderr(contains("Error:"));
}

#[test]
fn test_db_migrate_seeds_fresh_file() {
    let sb = Sandbox::new();

    sb.db_cmd()
        .args(["db", "--check"])
        .assert()
        .success()
        .stdout(contains("Missing pix_key row"));

    sb.db_cmd()
        .args(["db", "--migrate"])
        .assert()
        .success()
        .stdout(contains("Schema migrated: v0 → v1"));

    let conn = rusqlite::Connection::open(&sb.db_path).unwrap();
    let seeded: i64 = conn
        .query_row("SELECT COUNT(*) FROM config WHERE key = 'pix_key'", [], |r| {
            r.get(0)
        })
        .unwrap();
    assert_eq!(seeded, 1);
    drop(conn);

    sb.db_cmd()
        .args(["db", "--migrate", "--check"])
        .assert()
        .success()
        .stdout(contains("Schema already at v1"))
        .stdout(contains("Store check passed"));
}

#[test]
fn test_db_check_reports_malformed_phone() {
    let sb = Sandbox::new();
    sb.init();

    let conn = rusqlite::Connection::open(&sb.db_path).unwrap();
    conn.execute(
        "INSERT INTO debtors (phone, name) VALUES ('11 9999-8888', 'Torto')",
        [],
    )
    .unwrap();
    drop(conn);

    sb.db_cmd()
        .args(["db", "--check"])
        .assert()
        .success()
        .stdout(contains("Integrity check passed"))
        .stdout(contains("malformed phone keys: 11 9999-8888"))
        .stdout(contains("Store check passed").not());
}

#[test]
fn test_db_vacuum_keeps_rows() {
    let sb = Sandbox::new();
    sb.init();
    let csv = sb.file("clientes.csv", "phone,name,value,due_date,discount\n11999998888,João,100,15/02,10\n");
    sb.db_cmd()
        .args(["import", csv.to_str().unwrap()])
        .assert()
        .success();

    sb.db_cmd()
        .args(["db", "--vacuum"])
        .assert()
        .success()
        .stdout(contains("Vacuum completed (1 debtor(s), 1 config row(s) kept)"));

    sb.db_cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(contains("João"));
}
