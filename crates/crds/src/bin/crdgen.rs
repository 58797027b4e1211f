//! Prints the Runtime CustomResourceDefinition as YAML

use crds::Runtime;
use kube::CustomResourceExt;

fn main() -> Result<(), serde_yaml::Error> {
    print!("{}", serde_yaml::to_string(&Runtime::crd())?);
    Ok(())
}
