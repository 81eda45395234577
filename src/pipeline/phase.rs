use serde::{Deserialize, Serialize};

/// A single external step run inside a version's isolated environment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum StepName {
    CreateEnv,
    UpgradeInstaller,
    InstallProject,
    InstallRunner,
    InstallHooks,
    RunChecks,
}

impl StepName {
    pub fn definition(&self) -> &'static StepDefinition {
        // STEPS lists every variant exactly once
        STEPS
            .iter()
            .find(|s| s.name == *self)
            .unwrap_or(&STEPS[0])
    }
}

impl std::fmt::Display for StepName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.definition().display_name)
    }
}

pub struct StepDefinition {
    pub name: StepName,
    pub display_name: &'static str,
    pub description: &'static str,
}

/// Steps in execution order.
pub static STEPS: &[StepDefinition] = &[
    StepDefinition {
        name: StepName::CreateEnv,
        display_name: "create environment",
        description: "Create a fresh isolated environment with the target interpreter",
    },
    StepDefinition {
        name: StepName::UpgradeInstaller,
        display_name: "upgrade pip",
        description: "Upgrade the package installer inside the environment",
    },
    StepDefinition {
        name: StepName::InstallProject,
        display_name: "install project",
        description: "Install the project in editable mode",
    },
    StepDefinition {
        name: StepName::InstallRunner,
        display_name: "install pre-commit",
        description: "Install the check runner and any extra packages",
    },
    StepDefinition {
        name: StepName::InstallHooks,
        display_name: "install hooks",
        description: "Install the hook environments declared by the check config",
    },
    StepDefinition {
        name: StepName::RunChecks,
        display_name: "run checks",
        description: "Run the full check battery against the project tree",
    },
];
