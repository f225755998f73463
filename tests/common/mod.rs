#![allow(dead_code)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;

pub const GITOLITE_CONF: &str = "\
repo gitolite-admin
    RW+                 =   admin

repo testing
    -   refs/tags/      =   @all
    R                   =   @all
    RW  master          =   alice
";

pub const WILD_CONF: &str = "\
repo users/[a-z]+/.*
    C                   =   @all
    RW+                 =   CREATOR
";

pub const RULE_INFO: &str = "\
1 conf/gitolite.conf 2
2 conf/gitolite.conf 5
3 conf/gitolite.conf 6
4 conf/gitolite.conf 7
5 conf/wild.conf 2
";

pub const RULES: &str = r#"
repos = ["gitolite-admin", "testing"]

[[rule]]
id = 1
repo = "gitolite-admin"
users = ["admin"]
perm = "RW+"

[[rule]]
id = 2
repo = "testing"
users = ["@all"]
perm = "-"
refex = "refs/tags/"

[[rule]]
id = 3
repo = "testing"
users = ["@all"]
perm = "R"

[[rule]]
id = 4
repo = "testing"
users = ["alice"]
perm = "RW"
refex = "master"

[[rule]]
id = 5
repo = "users/[a-z]+/.*"
users = ["@all"]
perm = "C"
"#;

/// An administrative base directory with a small compiled rule base.
pub fn admin_base() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_base(dir.path());
    dir
}

pub fn write_base(base: &Path) {
    let conf = base.join("conf");
    fs::create_dir_all(&conf).unwrap();
    fs::write(conf.join("gitolite.conf"), GITOLITE_CONF).unwrap();
    fs::write(conf.join("wild.conf"), WILD_CONF).unwrap();
    fs::write(conf.join("rule_info"), RULE_INFO).unwrap();
    fs::write(conf.join("rules.toml"), RULES).unwrap();
}
