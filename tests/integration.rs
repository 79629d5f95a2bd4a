use std::{cell::RefCell, collections::HashSet, rc::Rc, str::from_utf8};

use bankomat::{
    bin_utils::Service,
    client::Bank,
    inventory::{Denomination, Inventory},
    processor::ProcessError,
};

const TEST_FILE: &str = include_str!("operations.csv");

#[test]
fn process_operation_script() {
    let mut output = Vec::new();
    let rejected: Rc<RefCell<Vec<String>>> = Rc::default();
    let inventory: Inventory = [(Denomination::Thousand, 1)].into_iter().collect();

    let service = Service {
        bank: Bank::new("Bibici"),
        inventory,
        input: TEST_FILE.as_bytes(),
        output: &mut output,
        error_printer: Box::new({
            let rejected = Rc::clone(&rejected);
            move |_line, err| match err {
                ProcessError::OperationErr(err) => rejected.borrow_mut().push(err.to_string()),
                // rejected domain operations, recorded the same way here
                ProcessError::DirectoryErr(err) => rejected.borrow_mut().push(err.to_string()),
                ProcessError::DispenserErr(err) => rejected.borrow_mut().push(err.to_string()),
            }
        }),
    };
    service.run().unwrap();

    // since the underlying client container uses a randomized hash function,
    // output order is not stable, so we collect lines into a hashset
    let lines: HashSet<String> = from_utf8(&output)
        .unwrap()
        .lines()
        .map(ToOwned::to_owned)
        .collect();
    assert_eq!(lines.len(), 3);
    assert!(lines.contains("client,balance"));
    assert!(lines.contains("Nikita,200"));
    assert!(lines.contains("Oleg,110"));

    // the over-balance withdrawal and the bogus denomination were rejected;
    // the unparseable row never reaches the processor
    let rejected = rejected.borrow();
    assert_eq!(rejected.len(), 2);
    assert!(rejected[0].contains("balance"));
    assert!(rejected[1].contains("not a recognized banknote denomination"));
}
