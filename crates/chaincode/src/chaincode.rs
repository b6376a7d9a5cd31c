//! Account chaincode - dispatch and response shaping

use crate::accessor::BalanceStore;
use crate::config::ChaincodeConfig;
use crate::error::ChaincodeError;
use crate::operations;
use acctbook_shim::{Chaincode, ChaincodeStub, Response};
use std::str::FromStr;
use strum_macros::{Display, EnumString};
use tracing::{debug, warn};

/// Functions accepted by `invoke`
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
pub enum Function {
    #[strum(serialize = "create")]
    Create,

    #[strum(serialize = "query")]
    Query,

    #[strum(serialize = "transfer")]
    Transfer,

    #[strum(to_string = "unsubscribe", serialize = "close")]
    Unsubscribe,
}

/// Account balance chaincode.
///
/// Holds configuration only; the founder and all balances live in the ledger.
#[derive(Debug, Clone, Default)]
pub struct AccountChaincode {
    config: ChaincodeConfig,
}

impl AccountChaincode {
    pub fn new(config: ChaincodeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ChaincodeConfig {
        &self.config
    }

    /// Run the setup operation with typed errors
    pub fn setup(
        &self,
        stub: &mut dyn ChaincodeStub,
        args: &[String],
    ) -> Result<(), ChaincodeError> {
        let mut store = BalanceStore::new(stub);
        operations::initialize(&self.config, &mut store, args)
    }

    /// Route `function` to its operation with typed errors
    pub fn execute(
        &self,
        stub: &mut dyn ChaincodeStub,
        function: &str,
        args: &[String],
    ) -> Result<Option<Vec<u8>>, ChaincodeError> {
        let function = Function::from_str(function)
            .map_err(|_| ChaincodeError::UnknownFunction(function.to_string()))?;
        let mut store = BalanceStore::new(stub);

        match function {
            Function::Create => operations::create(&mut store, args).map(|_| None),
            Function::Query => operations::query(&store, args).map(Some),
            Function::Transfer => operations::transfer(&mut store, args).map(|_| None),
            Function::Unsubscribe => {
                operations::close(&self.config, &mut store, args).map(|_| None)
            }
        }
    }
}

impl Chaincode for AccountChaincode {
    fn init(&self, stub: &mut dyn ChaincodeStub) -> Response {
        let tx_id = stub.tx_id().to_string();
        let (_, args) = stub.function_and_parameters();
        respond(&tx_id, "init", self.setup(stub, &args).map(|_| None))
    }

    fn invoke(&self, stub: &mut dyn ChaincodeStub) -> Response {
        let tx_id = stub.tx_id().to_string();
        let (function, args) = stub.function_and_parameters();
        debug!(tx_id = %tx_id, function = %function, args = args.len(), "invoke");
        respond(&tx_id, &function, self.execute(stub, &function, &args))
    }
}

fn respond(tx_id: &str, function: &str, result: Result<Option<Vec<u8>>, ChaincodeError>) -> Response {
    match result {
        Ok(payload) => Response::success(payload),
        Err(err) => {
            warn!(tx_id, function, code = err.code(), error = %err, "invocation rejected");
            Response::error(err.to_string())
        }
    }
}
