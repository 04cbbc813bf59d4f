use std::fs;
use std::path::Path;
use std::process::Command;

use icg_core::config::{GeneratorKind, IcgConfig};
use icg_core::{CodeGenerator, GeneratedFile, parse};
use icg_csharp::{CSharpGenerator, InfluxCSharpGenerator, build};

const TELEGRAF: &str = include_str!("../../icg-core/tests/fixtures/telegraf.yaml");

fn generate(generator: GeneratorKind) -> Vec<GeneratedFile> {
    let spec = parse::from_yaml(TELEGRAF).unwrap();
    let config = IcgConfig {
        generator,
        ..IcgConfig::default()
    };
    CSharpGenerator.generate(&spec, &config).unwrap()
}

fn file<'a>(files: &'a [GeneratedFile], path: &str) -> &'a str {
    files
        .iter()
        .find(|f| f.path == path)
        .map(|f| f.content.as_str())
        .unwrap_or_else(|| panic!("{path} should be generated"))
}

#[test]
fn test_only_client_runtime_is_kept() {
    let files = generate(GeneratorKind::InfluxCsharp);

    let supporting: Vec<_> = files
        .iter()
        .filter(|f| !f.path.starts_with("Model/") && !f.path.starts_with("Service/"))
        .map(|f| f.path.as_str())
        .collect();
    assert_eq!(supporting.len(), 9);
    assert!(supporting.iter().all(|p| p.starts_with("Client/")));
    assert!(supporting.contains(&"Client/ApiClient.cs"));
    assert!(!supporting.contains(&"README.md"));
}

#[test]
fn test_plain_csharp_keeps_project_files() {
    let files = generate(GeneratorKind::Csharp);

    assert!(files.iter().any(|f| f.path == "README.md"));
    assert!(files.iter().any(|f| f.path == "InfluxDB.Client.Api.csproj"));
    assert!(files.iter().any(|f| f.path == "Service/TelegrafsApi.cs"));
}

#[test]
fn test_telegraf_request_dispatches_plugins() {
    let files = generate(GeneratorKind::InfluxCsharp);

    let request = file(&files, "Model/TelegrafRequest.cs");
    assert!(request.contains("[JsonConverter(typeof(TelegrafRequestPluginsAdapter))]"));
    assert!(request.contains("public class TelegrafRequestPluginsAdapter : JsonConverter"));
    assert!(request.contains("{new []{ \"cpu\", \"input\" }, typeof(TelegrafPluginInputCpu)},"));
    assert!(request.contains("{new []{ \"docker\", \"input\" }, typeof(TelegrafPluginInputDocker)},"));
    assert!(request.contains("{new []{ \"file\", \"output\" }, typeof(TelegrafPluginOutputFile)},"));
    assert!(request.contains("case JsonToken.StartArray:"));
}

#[test]
fn test_plugins_extend_request_plugin() {
    let files = generate(GeneratorKind::InfluxCsharp);

    let cpu = file(&files, "Model/TelegrafPluginInputCpu.cs");
    assert!(cpu.contains("public partial class TelegrafPluginInputCpu : TelegrafRequestPlugin, IEquatable<TelegrafPluginInputCpu>"));
    assert!(cpu.contains("Type = TelegrafRequestPlugin.TypeEnum.Input;"));
    assert!(cpu.contains("Name = TelegrafPluginInputCpu.NameEnum.Cpu;"));
    assert!(!cpu.contains("public TypeEnum"));

    let plugin = file(&files, "Model/TelegrafRequestPlugin.cs");
    assert!(plugin.contains("public enum TypeEnum"));
    assert!(plugin.contains("[EnumMember(Value = \"output\")]"));

    let config = file(&files, "Model/TelegrafPluginInputDockerConfig.cs");
    assert!(!config.contains(": TelegrafRequestPlugin"));
}

#[test]
fn test_telegraf_omits_read_only_parent_members() {
    let files = generate(GeneratorKind::InfluxCsharp);

    let telegraf = file(&files, "Model/Telegraf.cs");
    assert!(telegraf.contains("public partial class Telegraf : TelegrafRequest, IEquatable<Telegraf>"));
    assert!(telegraf.contains(": base("));
    assert!(!telegraf.contains("createdAt"));
}

#[test]
fn test_services() {
    let files = generate(GeneratorKind::InfluxCsharp);

    let telegrafs = file(&files, "Service/TelegrafsService.cs");
    assert!(telegrafs.contains("public partial class TelegrafsService : ITelegrafsService"));
    assert!(telegrafs.contains("\"/api/v2/telegrafs/{telegrafID}\""));
    assert!(telegrafs.contains("string GetTelegrafsIDstring("));
    assert!(telegrafs.contains("Telegraf GetTelegrafsID("));
    assert!(telegrafs.contains("TelegrafStatus? status = null"));

    let ready = file(&files, "Service/ReadyService.cs");
    assert!(ready.contains("new RestRequest(\"/ready\", Method.Get)"));

    let signin = file(&files, "Service/SigninService.cs");
    assert!(signin.contains("string authorization = null"));
    assert!(signin.contains("localVarRequest.AddHeader(\"Authorization\""));
}

#[test]
fn test_build_groups_by_tag() {
    let spec = parse::from_yaml(TELEGRAF).unwrap();
    let mut codegen = InfluxCSharpGenerator::for_package("InfluxDB.Client.Api");

    let generation = build(&mut codegen, &spec).unwrap();

    let classes: Vec<_> = generation.apis.iter().map(|a| a.classname.as_str()).collect();
    assert_eq!(classes, vec!["ReadyService", "SigninService", "TelegrafsService"]);
    let telegrafs = &generation.apis[2];
    let ids: Vec<_> = telegrafs.operations.iter().map(|o| o.operation_id.as_str()).collect();
    assert_eq!(ids, vec!["GetTelegrafs", "PostTelegrafs", "GetTelegrafsID", "GetTelegrafsIDstring"]);
    assert!(generation.models.contains_key("TelegrafRequestPlugin"));
}

fn write_files(dir: &Path, files: &[GeneratedFile]) {
    for file in files {
        let path = dir.join(&file.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, &file.content).unwrap();
    }
}

#[test]
#[ignore] // Requires the .NET SDK installed
fn generated_csharp_compiles() {
    let files = generate(GeneratorKind::Csharp);

    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path();
    write_files(dir, &files);

    let output = Command::new("dotnet")
        .args(["build", "--nologo"])
        .current_dir(dir)
        .output()
        .expect("failed to run dotnet");

    if !output.status.success() {
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("C# compilation failed:\nstdout: {stdout}\nstderr: {stderr}");
    }
}
