use broadside::{BitBoard, BitBoardError, BB};

#[test]
fn test_get_set() {
    let mut bb = BitBoard::<u16, 4>::new();
    assert!(bb.is_empty());

    bb.set(1, 1).unwrap();
    assert!(bb.get(1, 1).unwrap());
    assert!(!bb.get(1, 2).unwrap());
    assert!(!bb.is_empty());
}

#[test]
fn test_layer_ops() {
    let a = BitBoard::<u16, 4>::from_cells([(0, 0), (1, 1)]).unwrap();
    let b = BitBoard::<u16, 4>::from_cells([(1, 1), (2, 2)]).unwrap();
    assert_eq!((a & b).count_ones(), 1);
    assert_eq!((a | b).count_ones(), 3);
    assert_eq!((a & !b).iter_set_bits().collect::<Vec<_>>(), vec![(0, 0)]);
}

#[test]
fn test_out_of_bounds() {
    let mut bb = BitBoard::<u16, 4>::new();
    assert_eq!(
        bb.set(4, 0),
        Err(BitBoardError::IndexOutOfBounds { row: 4, col: 0 })
    );
    assert!(bb.get(0, 4).is_err());
}

#[test]
fn test_from_cells_and_iter() {
    let bb = BitBoard::<u16, 4>::from_cells([(0, 1), (3, 3)]).unwrap();
    let bits: Vec<_> = bb.iter_set_bits().collect();
    assert_eq!(bits, vec![(0, 1), (3, 3)]);
    assert_eq!(bb.count_ones(), 2);
}

#[test]
fn test_not_stays_on_board() {
    let bb = !BB::new();
    assert_eq!(bb.count_ones(), 81);
    let raw = BB::from_raw(u128::MAX);
    assert_eq!(raw, bb);
}

#[test]
fn test_row_major_matches_cells() {
    let bb = BB::from_cells([(0, 0), (1, 2), (8, 8)]).unwrap();
    let cells: [bool; 81] = bb.to_row_major();
    let set: Vec<usize> = (0..81).filter(|&i| cells[i]).collect();
    assert_eq!(set, vec![0, 11, 80]);
}

#[test]
fn test_deserialize_masks_high_bits() {
    let bytes = bincode::serialize(&u128::MAX).unwrap();
    let bb: BB = bincode::deserialize(&bytes).unwrap();
    assert_eq!(bb.count_ones(), 81);
}
